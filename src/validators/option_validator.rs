use super::{Outcome, Validator};
use crate::context::Context;
use crate::errors::ValidationError;
use crate::value::Value;

/// Membership in a fixed set of values, compared structurally.
///
/// `Int(1)` and `Float(1.0)` are different values.
pub struct OneOf {
    options: Vec<Value>,
}

impl OneOf {
    pub fn new<I, V>(options: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            options: options.into_iter().map(Into::into).collect(),
        }
    }
}

impl Validator for OneOf {
    fn validate(&self, _ctx: &Context, value: &Value) -> Outcome {
        if self.options.contains(value) {
            return Outcome::pass();
        }

        Outcome::fail(ValidationError::InvalidOption {
            options: self.options.clone(),
            actual: value.clone(),
        })
    }
}
