use super::kind_validator::fractional_digits;
use super::{Outcome, Validator};
use crate::context::Context;
use crate::errors::ValidationError;
use crate::value::Value;

/// Minimum number of characters (Unicode scalar values) in a string.
pub struct MinLength {
    pub min_length: usize,
}

impl MinLength {
    pub fn new(min_length: usize) -> Self {
        Self { min_length }
    }
}

impl Validator for MinLength {
    fn validate(&self, _ctx: &Context, value: &Value) -> Outcome {
        let Some(s) = value.as_str() else {
            return Outcome::stop(ValidationError::NotAString);
        };

        if s.chars().count() < self.min_length {
            return Outcome::fail(ValidationError::StringTooShort {
                min_length: self.min_length,
            });
        }

        Outcome::pass()
    }
}

pub struct MaxLength {
    pub max_length: usize,
}

impl MaxLength {
    pub fn new(max_length: usize) -> Self {
        Self { max_length }
    }
}

impl Validator for MaxLength {
    fn validate(&self, _ctx: &Context, value: &Value) -> Outcome {
        let Some(s) = value.as_str() else {
            return Outcome::stop(ValidationError::NotAString);
        };

        let actual_length = s.chars().count();
        if actual_length > self.max_length {
            return Outcome::fail(ValidationError::StringTooLong {
                max_length: self.max_length,
                actual_length,
            });
        }

        Outcome::pass()
    }
}

/// Minimum number of list items. When `blocking` is set a violation also
/// stops the node, so the items are not visited.
pub struct MinSize {
    pub min_size: usize,
    pub blocking: bool,
}

impl MinSize {
    pub fn new(min_size: usize) -> Self {
        Self {
            min_size,
            blocking: false,
        }
    }

    pub fn blocking(min_size: usize) -> Self {
        Self {
            min_size,
            blocking: true,
        }
    }
}

impl Validator for MinSize {
    fn validate(&self, _ctx: &Context, value: &Value) -> Outcome {
        let Some(items) = value.as_list() else {
            return Outcome::stop(ValidationError::NotAList);
        };

        if items.len() < self.min_size {
            return Outcome {
                stop: self.blocking,
                errors: vec![ValidationError::MinSize {
                    min_size: self.min_size,
                    actual_size: items.len(),
                }],
            };
        }

        Outcome::pass()
    }
}

pub struct MaxSize {
    pub max_size: usize,
    pub blocking: bool,
}

impl MaxSize {
    pub fn new(max_size: usize) -> Self {
        Self {
            max_size,
            blocking: false,
        }
    }

    pub fn blocking(max_size: usize) -> Self {
        Self {
            max_size,
            blocking: true,
        }
    }
}

impl Validator for MaxSize {
    fn validate(&self, _ctx: &Context, value: &Value) -> Outcome {
        let Some(items) = value.as_list() else {
            return Outcome::stop(ValidationError::NotAList);
        };

        if items.len() > self.max_size {
            return Outcome {
                stop: self.blocking,
                errors: vec![ValidationError::MaxSize {
                    max_size: self.max_size,
                    actual_size: items.len(),
                }],
            };
        }

        Outcome::pass()
    }
}

pub struct MinFloat {
    pub min_float: f64,
}

impl MinFloat {
    pub fn new(min_float: f64) -> Self {
        Self { min_float }
    }
}

impl Validator for MinFloat {
    fn validate(&self, _ctx: &Context, value: &Value) -> Outcome {
        let Some(number) = value.as_f64() else {
            return Outcome::stop(ValidationError::NotAFloat);
        };

        if number < self.min_float {
            return Outcome::fail(ValidationError::FloatTooSmall {
                min_float: self.min_float,
            });
        }

        Outcome::pass()
    }
}

pub struct MaxFloat {
    pub max_float: f64,
}

impl MaxFloat {
    pub fn new(max_float: f64) -> Self {
        Self { max_float }
    }
}

impl Validator for MaxFloat {
    fn validate(&self, _ctx: &Context, value: &Value) -> Outcome {
        let Some(number) = value.as_f64() else {
            return Outcome::stop(ValidationError::NotAFloat);
        };

        if number > self.max_float {
            return Outcome::fail(ValidationError::FloatTooLarge {
                max_float: self.max_float,
            });
        }

        Outcome::pass()
    }
}

/// Number check with a cap on decimal places.
///
/// The float is rendered with six fixed decimals, trailing zeros are
/// stripped, and the remaining fractional digits are counted. Integers
/// have no fractional digits and always pass.
pub struct FloatPrecision {
    pub max_precision: usize,
}

impl FloatPrecision {
    pub fn new(max_precision: usize) -> Self {
        Self { max_precision }
    }
}

impl Validator for FloatPrecision {
    fn validate(&self, _ctx: &Context, value: &Value) -> Outcome {
        let f = match value {
            Value::Int(_) => return Outcome::pass(),
            Value::Float(f) => *f,
            _ => return Outcome::stop(ValidationError::NotAFloat),
        };

        let digits = fractional_digits(f);
        let actual_precision = digits.trim_end_matches('0').len();

        if actual_precision > self.max_precision {
            return Outcome::fail(ValidationError::FloatPrecision {
                expected_precision: self.max_precision,
                actual_precision,
            });
        }

        Outcome::pass()
    }
}
