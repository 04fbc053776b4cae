use super::types::{Definition, DefinitionError, Kind, Rule};
use crate::schema::Schema;
use crate::validators::{
    Base64, Email, FloatPrecision, IsBoolean, IsInteger, IsList, IsMap, IsNumber, IsString, Ipv4,
    Ipv6, Json, LowerCase, MaxFloat, MaxLength, MaxSize, MinFloat, MinLength, MinSize, OneOf,
    Regexp, UpperCase, Url, Uuid, Validator, Xid,
};
use std::sync::Arc;
use tracing::debug;

/// Decodes a YAML (or JSON, which YAML reads just as well) document.
pub fn string_to_json(input: &str) -> Result<serde_json::Value, DefinitionError> {
    serde_yaml::from_str(input).map_err(|error| DefinitionError::Parse(error.to_string()))
}

pub fn get_definition(json: &serde_json::Value) -> Result<Definition, DefinitionError> {
    serde_json::from_value(json.clone()).map_err(|error| DefinitionError::Parse(error.to_string()))
}

pub fn compile(definition: &Definition) -> Result<Schema, DefinitionError> {
    compile_at(definition, "")
}

fn compile_at(definition: &Definition, pointer: &str) -> Result<Schema, DefinitionError> {
    let mut validators: Vec<Arc<dyn Validator>> = Vec::new();

    if let Some(kind) = definition.kind {
        validators.push(kind_validator(kind));
    }

    for (index, rule) in definition.rules.iter().enumerate() {
        validators.push(rule_validator(rule, &format!("{}/rules/{}", pointer, index))?);
    }

    let mut schema = Schema::from_validators(validators).with_extra(definition.extra);
    if definition.required {
        schema = schema.required();
    }

    if let Some(fields) = &definition.fields {
        let compiled = fields
            .iter()
            .map(|(name, field)| {
                compile_at(field, &format!("{}/fields/{}", pointer, escape_token(name)))
                    .map(|schema| (name.clone(), schema))
            })
            .collect::<Result<Vec<_>, _>>()?;

        schema = schema
            .with_fields(compiled)
            .map_err(|source| DefinitionError::Shape {
                path: location(pointer),
                source,
            })?;
    }

    if let Some(items) = &definition.items {
        let compiled = compile_at(items, &format!("{}/items", pointer))?;

        schema = schema
            .with_items(compiled)
            .map_err(|source| DefinitionError::Shape {
                path: location(pointer),
                source,
            })?;
    }

    debug!(path = %location(pointer), validators = schema.validators().len(), "compiled schema node");
    Ok(schema)
}

/// Escapes a key for use as a JSON pointer reference token.
fn escape_token(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}

fn location(pointer: &str) -> String {
    match pointer.is_empty() {
        true => "/".to_string(),
        false => pointer.to_string(),
    }
}

fn kind_validator(kind: Kind) -> Arc<dyn Validator> {
    match kind {
        Kind::String => Arc::new(IsString),
        Kind::Integer => Arc::new(IsInteger),
        Kind::Number | Kind::Float => Arc::new(IsNumber),
        Kind::Boolean => Arc::new(IsBoolean),
        Kind::Map => Arc::new(IsMap),
        Kind::List => Arc::new(IsList),
    }
}

fn rule_validator(rule: &Rule, pointer: &str) -> Result<Arc<dyn Validator>, DefinitionError> {
    let validator: Arc<dyn Validator> = match rule {
        Rule::MinLength(min_length) => Arc::new(MinLength::new(*min_length)),
        Rule::MaxLength(max_length) => Arc::new(MaxLength::new(*max_length)),
        Rule::Pattern(pattern) => {
            Arc::new(
                Regexp::new(pattern).map_err(|source| DefinitionError::Pattern {
                    path: pointer.to_string(),
                    source,
                })?,
            )
        }
        Rule::OneOf(options) => Arc::new(OneOf::new(options.iter().cloned())),
        Rule::MinSize(size) => match size.is_blocking() {
            true => Arc::new(MinSize::blocking(size.size())),
            false => Arc::new(MinSize::new(size.size())),
        },
        Rule::MaxSize(size) => match size.is_blocking() {
            true => Arc::new(MaxSize::blocking(size.size())),
            false => Arc::new(MaxSize::new(size.size())),
        },
        Rule::Min(min_float) => Arc::new(MinFloat::new(*min_float)),
        Rule::Max(max_float) => Arc::new(MaxFloat::new(*max_float)),
        Rule::Precision(precision) => Arc::new(FloatPrecision::new(*precision)),
        Rule::Email => Arc::new(Email),
        Rule::Url => Arc::new(Url),
        Rule::Uuid => Arc::new(Uuid),
        Rule::Xid => Arc::new(Xid),
        Rule::Ipv4 => Arc::new(Ipv4),
        Rule::Ipv6 => Arc::new(Ipv6),
        Rule::Base64 => Arc::new(Base64),
        Rule::Json => Arc::new(Json),
        Rule::LowerCase => Arc::new(LowerCase),
        Rule::UpperCase => Arc::new(UpperCase),
    };

    Ok(validator)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::context::Context;
    use crate::dsl::types::SizeRule;
    use crate::schema::ExtraFields;
    use crate::value::Value;
    use serde_json::json;

    fn definition(input: &str) -> Definition {
        let json = string_to_json(input).expect("Unable to parse yaml");
        get_definition(&json).expect("Unable to read definition")
    }

    #[test]
    fn successfully_read_definition() {
        let input = r#"
            type: map
            required: true
            extra: forbid
            fields:
              name:
                type: string
                rules:
                  - min_length: 3
                  - email
              tags:
                type: list
                rules:
                  - min_size: { size: 1, blocking: true }
                  - max_size: 3
                items:
                  type: string
        "#;

        let definition = definition(input);
        assert_eq!(definition.kind, Some(Kind::Map));
        assert!(definition.required);
        assert_eq!(definition.extra, ExtraFields::Forbid);

        let fields = definition.fields.as_ref().unwrap();
        assert_eq!(
            fields["name"].rules,
            vec![Rule::MinLength(3), Rule::Email]
        );
        assert_eq!(
            fields["tags"].rules,
            vec![
                Rule::MinSize(SizeRule::Detailed {
                    size: 1,
                    blocking: true
                }),
                Rule::MaxSize(SizeRule::Size(3)),
            ]
        );
        assert_eq!(fields["tags"].items.as_ref().unwrap().kind, Some(Kind::String));
    }

    #[test]
    fn reads_json_definitions() {
        let definition = definition(r#"{"type": "integer", "rules": [{"min": 1}]}"#);
        assert_eq!(definition.kind, Some(Kind::Integer));
        assert_eq!(definition.rules, vec![Rule::Min(1.0)]);
    }

    #[test]
    fn reports_parse_errors() {
        let error = get_definition(&json!({"type": "map", "colour": "red"})).unwrap_err();
        assert!(matches!(error, DefinitionError::Parse(_)));

        assert!(matches!(
            string_to_json("type: [unterminated"),
            Err(DefinitionError::Parse(_))
        ));
    }

    #[test]
    fn compiled_schema_validates() {
        let input = r#"
            type: map
            extra: forbid
            fields:
              name:
                type: string
                required: true
                rules:
                  - min_length: 3
              age:
                type: integer
                rules:
                  - min: 0
              tags:
                type: list
                items:
                  type: string
        "#;

        let schema = compile(&definition(input)).unwrap();
        let ctx = Context::background();

        let (valid, _) = schema.validate(
            &ctx,
            &Value::from(json!({"name": "Ada", "age": 36, "tags": ["x"]})),
        );
        assert!(valid);

        let (valid, errors) = schema.validate(
            &ctx,
            &Value::from(json!({"name": "Al", "age": -1, "tags": [1], "extra": true})),
        );
        assert!(!valid);
        assert_eq!(errors["$"], vec!["unexpected field extra"]);
        assert_eq!(errors["$.name"], vec!["expected at least 3 characters"]);
        assert_eq!(errors["$.age"], vec!["value is less than min"]);
        assert_eq!(errors["$.tags[0]"], vec!["not a string"]);
    }

    #[test]
    fn invalid_pattern_is_located() {
        let input = r#"
            fields:
              code:
                rules:
                  - pattern: "([a-z"
        "#;

        match compile(&definition(input)) {
            Err(DefinitionError::Pattern { path, .. }) => assert_eq!(path, "/fields/code/rules/0"),
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn field_names_are_escaped_in_locations() {
        let input = r#"
            fields:
              "a/b":
                fields:
                  "c~d":
                    rules:
                      - pattern: "([a-z"
        "#;

        match compile(&definition(input)) {
            Err(DefinitionError::Pattern { path, .. }) => {
                assert_eq!(path, "/fields/a~1b/fields/c~0d/rules/0")
            }
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn fields_and_items_conflict() {
        let input = r#"
            fields:
              a: { type: string }
            items:
              type: string
        "#;

        match compile(&definition(input)) {
            Err(DefinitionError::Shape { path, .. }) => assert_eq!(path, "/"),
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }
}
