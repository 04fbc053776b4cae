use super::{Outcome, Validator};
use crate::context::Context;
use crate::errors::ValidationError;
use crate::value::Value;

/// Formats like `%f`: six fixed decimals. Shared with the precision check.
pub(crate) fn fractional_digits(f: f64) -> String {
    let rendered = format!("{:.6}", f);
    rendered
        .split_once('.')
        .map(|(_, fraction)| fraction.to_string())
        .unwrap_or_default()
}

pub struct IsString;

impl Validator for IsString {
    fn validate(&self, _ctx: &Context, value: &Value) -> Outcome {
        match value {
            Value::String(_) => Outcome::pass(),
            _ => Outcome::stop(ValidationError::NotAString),
        }
    }
}

/// Accepts integers and floats without a fractional part.
pub struct IsInteger;

impl Validator for IsInteger {
    fn validate(&self, _ctx: &Context, value: &Value) -> Outcome {
        match value {
            Value::Int(_) => Outcome::pass(),
            Value::Float(f) if f.is_finite() && fractional_digits(*f).chars().all(|c| c == '0') => {
                Outcome::pass()
            }
            _ => Outcome::stop(ValidationError::NotAnInteger),
        }
    }
}

pub struct IsNumber;

impl Validator for IsNumber {
    fn validate(&self, _ctx: &Context, value: &Value) -> Outcome {
        match value {
            Value::Int(_) | Value::Float(_) => Outcome::pass(),
            _ => Outcome::stop(ValidationError::NotANumber),
        }
    }
}

pub struct IsBoolean;

impl Validator for IsBoolean {
    fn validate(&self, _ctx: &Context, value: &Value) -> Outcome {
        match value {
            Value::Bool(_) => Outcome::pass(),
            _ => Outcome::stop(ValidationError::NotABoolean),
        }
    }
}

pub struct IsMap;

impl Validator for IsMap {
    fn validate(&self, _ctx: &Context, value: &Value) -> Outcome {
        match value {
            Value::Map(_) => Outcome::pass(),
            _ => Outcome::stop(ValidationError::NotAMap),
        }
    }
}

pub struct IsList;

impl Validator for IsList {
    fn validate(&self, _ctx: &Context, value: &Value) -> Outcome {
        match value {
            Value::List(_) => Outcome::pass(),
            _ => Outcome::stop(ValidationError::NotAList),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(validator: &dyn Validator, value: Value) -> Outcome {
        validator.validate(&Context::background(), &value)
    }

    #[test]
    fn string_kind() {
        assert!(run(&IsString, Value::from("x")).is_ok());
        assert_eq!(
            run(&IsString, Value::Int(1)),
            Outcome::stop(ValidationError::NotAString)
        );
        assert_eq!(
            run(&IsString, Value::Null),
            Outcome::stop(ValidationError::NotAString)
        );
    }

    #[test]
    fn integer_kind_accepts_whole_floats() {
        assert!(run(&IsInteger, Value::Int(-7)).is_ok());
        assert!(run(&IsInteger, Value::Float(3.0)).is_ok());
        assert_eq!(
            run(&IsInteger, Value::Float(3.25)),
            Outcome::stop(ValidationError::NotAnInteger)
        );
        assert_eq!(
            run(&IsInteger, Value::from("3")),
            Outcome::stop(ValidationError::NotAnInteger)
        );
        assert_eq!(
            run(&IsInteger, Value::Float(f64::NAN)),
            Outcome::stop(ValidationError::NotAnInteger)
        );
    }

    #[test]
    fn number_kind_does_not_coerce_strings() {
        assert!(run(&IsNumber, Value::Int(1)).is_ok());
        assert!(run(&IsNumber, Value::Float(1.5)).is_ok());
        assert_eq!(
            run(&IsNumber, Value::from("1.5")),
            Outcome::stop(ValidationError::NotANumber)
        );
    }

    #[test]
    fn boolean_map_and_list_kinds() {
        assert!(run(&IsBoolean, Value::Bool(false)).is_ok());
        assert_eq!(
            run(&IsBoolean, Value::Int(0)),
            Outcome::stop(ValidationError::NotABoolean)
        );

        assert!(run(&IsMap, Value::Map(Default::default())).is_ok());
        assert_eq!(
            run(&IsMap, Value::List(vec![])),
            Outcome::stop(ValidationError::NotAMap)
        );

        assert!(run(&IsList, Value::List(vec![])).is_ok());
        assert_eq!(
            run(&IsList, Value::Null),
            Outcome::stop(ValidationError::NotAList)
        );
    }

    #[test]
    fn fractional_digits_use_six_places() {
        assert_eq!(fractional_digits(1.23), "230000");
        assert_eq!(fractional_digits(2.0), "000000");
    }
}
