//! Nullability leaves. The schema engine handles `required` itself, these
//! exist for composing validator lists by hand.

use super::{Outcome, Validator};
use crate::context::Context;
use crate::errors::ValidationError;
use crate::value::Value;

/// Null is an error and ends the node.
pub struct NonNullable;

impl Validator for NonNullable {
    fn validate(&self, _ctx: &Context, value: &Value) -> Outcome {
        match value {
            Value::Null => Outcome::stop(ValidationError::Required),
            _ => Outcome::pass(),
        }
    }
}

/// Null ends the node quietly; anything else carries on.
pub struct Nullable;

impl Validator for Nullable {
    fn validate(&self, _ctx: &Context, value: &Value) -> Outcome {
        match value {
            Value::Null => Outcome::halt(),
            _ => Outcome::pass(),
        }
    }
}
