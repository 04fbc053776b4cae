//! Leaf validators and the schema traversal engine.
//!
//! Every leaf implements [`Validator`]: it inspects one value and returns an
//! [`Outcome`]. `stop` tells the engine to skip the remaining validators of
//! the node and not to descend into its fields or items.

use crate::context::Context;
use crate::errors::ValidationError;
use crate::value::Value;

pub mod bound_validator;
pub mod format_validator;
pub mod kind_validator;
pub mod null_validator;
pub mod option_validator;
pub mod schema_validator;

pub use bound_validator::{
    FloatPrecision, MaxFloat, MaxLength, MaxSize, MinFloat, MinLength, MinSize,
};
pub use format_validator::{
    Base64, Email, Ipv4, Ipv6, Json, LowerCase, Regexp, UpperCase, Url, Uuid, Xid,
};
pub use kind_validator::{IsBoolean, IsInteger, IsList, IsMap, IsNumber, IsString};
pub use null_validator::{NonNullable, Nullable};
pub use option_validator::OneOf;
pub use schema_validator::{SchemaValidator, ValidationContext};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Outcome {
    pub stop: bool,
    pub errors: Vec<ValidationError>,
}

impl Outcome {
    pub fn pass() -> Self {
        Self::default()
    }

    /// Records the error and halts the node.
    pub fn stop(error: ValidationError) -> Self {
        Self {
            stop: true,
            errors: vec![error],
        }
    }

    /// Records the error and lets the node carry on.
    pub fn fail(error: ValidationError) -> Self {
        Self {
            stop: false,
            errors: vec![error],
        }
    }

    /// Halts the node without reporting anything.
    pub fn halt() -> Self {
        Self {
            stop: true,
            errors: vec![],
        }
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

pub trait Validator: Send + Sync {
    fn validate(&self, ctx: &Context, value: &Value) -> Outcome;

    /// Whether a null value gets through this validator without a
    /// `Required` error.
    fn accepts_null(&self) -> bool {
        !self
            .validate(&Context::background(), &Value::Null)
            .errors
            .iter()
            .any(|error| matches!(error, ValidationError::Required))
    }
}

impl<F> Validator for F
where
    F: Fn(&Context, &Value) -> Outcome + Send + Sync,
{
    fn validate(&self, ctx: &Context, value: &Value) -> Outcome {
        self(ctx, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_validators() {
        let even = |_: &Context, value: &Value| match value {
            Value::Int(i) if i % 2 == 0 => Outcome::pass(),
            _ => Outcome::fail(ValidationError::custom("even", "must be even")),
        };

        let ctx = Context::background();
        assert!(even.validate(&ctx, &Value::Int(4)).is_ok());
        assert_eq!(
            even.validate(&ctx, &Value::Int(3)).errors,
            vec![ValidationError::custom("even", "must be even")]
        );
    }

    #[test]
    fn accepts_null() {
        assert!(Nullable.accepts_null());
        assert!(IsString.accepts_null());
        assert!(!NonNullable.accepts_null());
    }
}
