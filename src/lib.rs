pub mod collectors;
pub mod context;
pub mod dsl;
pub mod errors;
pub mod presenters;
pub mod schema;
pub mod validators;
pub mod value;

pub use collectors::{ErrorCollector, FlatErrorCollector, MapErrorCollector, RawErrorCollector};
pub use context::Context;
pub use errors::{ErrorKind, ValidationError};
pub use schema::{ExtraFields, Field, Schema, SchemaError};
pub use validators::{Outcome, SchemaValidator, Validator};
pub use value::Value;

use std::collections::BTreeMap;

/// Validates a decoded JSON document with the default presenters.
pub fn validate(
    json: &serde_json::Value,
    schema: &Schema,
) -> Result<(), BTreeMap<String, Vec<String>>> {
    let (valid, errors) = schema.validate(&Context::background(), &Value::from(json.clone()));

    match valid {
        true => Ok(()),
        false => Err(errors),
    }
}
