//! The declarative schema-definition format.
//!
//! A definition document is decoded, checked against the embedded
//! meta-schema, read into a [`Definition`] and compiled into a [`Schema`].

pub mod display;
pub mod parsing;
pub mod types;
pub mod validation;

use crate::schema::Schema;
use types::{Definition, DefinitionError};

pub fn load(input: &str) -> Result<(Definition, Schema), DefinitionError> {
    let json = parsing::string_to_json(input)?;

    validation::lint(&json, &validation::get_json_schema()).map_err(DefinitionError::Invalid)?;

    let definition = parsing::get_definition(&json)?;
    let schema = parsing::compile(&definition)?;

    Ok((definition, schema))
}

pub fn load_schema(input: &str) -> Result<Schema, DefinitionError> {
    load(input).map(|(_, schema)| schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_rejects_meta_schema_violations() {
        match load_schema("type: map\nfields: { a: { kind: string } }") {
            Err(DefinitionError::Invalid(errors)) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].instance_path, "/fields/a");
            }
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn load_returns_definition_and_schema() {
        let (definition, schema) = load("type: string\nrequired: true").unwrap();
        assert!(definition.required);
        assert!(schema.is_required());
        assert_eq!(schema.validators().len(), 1);
    }
}
