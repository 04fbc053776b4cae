use colored::*;
use jsonschema::{Draft, JSONSchema};
use serde_json::json;

use crate::dsl::types::LintError;

const UNIT_RULES: [&str; 10] = [
    "email",
    "url",
    "uuid",
    "xid",
    "ipv4",
    "ipv6",
    "base64",
    "json",
    "lower_case",
    "upper_case",
];

pub fn error_header(head: &str) -> String {
    format!("  {}  ", head).on_red().black().to_string()
}

pub fn get_json_schema() -> JSONSchema {
    let schema = json!(
        {
            "$schema": "http://json-schema.org/draft-07/schema#",
            "$ref": "#/definitions/Node",
            "definitions": {
                "Node": {
                    "type": "object",
                    "additionalProperties": false,
                    "properties": {
                        "type": {
                            "enum": ["string", "integer", "number", "float", "boolean", "map", "list"]
                        },
                        "required": {
                            "type": "boolean"
                        },
                        "extra": {
                            "enum": ["forbid", "ignore"]
                        },
                        "rules": {
                            "type": "array",
                            "items": {
                                "$ref": "#/definitions/Rule"
                            }
                        },
                        "fields": {
                            "type": "object",
                            "additionalProperties": {
                                "$ref": "#/definitions/Node"
                            }
                        },
                        "items": {
                            "$ref": "#/definitions/Node"
                        }
                    },
                    "not": {
                        "required": ["fields", "items"]
                    },
                    "title": "Node"
                },
                "Rule": {
                    "oneOf": [
                        {
                            "enum": UNIT_RULES
                        },
                        {
                            "$ref": "#/definitions/KeyedRule"
                        }
                    ],
                    "title": "Rule"
                },
                "KeyedRule": {
                    "type": "object",
                    "additionalProperties": false,
                    "minProperties": 1,
                    "maxProperties": 1,
                    "properties": {
                        "min_length": {
                            "type": "integer",
                            "minimum": 0
                        },
                        "max_length": {
                            "type": "integer",
                            "minimum": 0
                        },
                        "pattern": {
                            "type": "string"
                        },
                        "one_of": {
                            "type": "array",
                            "minItems": 1
                        },
                        "min_size": {
                            "$ref": "#/definitions/Size"
                        },
                        "max_size": {
                            "$ref": "#/definitions/Size"
                        },
                        "min": {
                            "type": "number"
                        },
                        "max": {
                            "type": "number"
                        },
                        "precision": {
                            "type": "integer",
                            "minimum": 0
                        }
                    },
                    "title": "KeyedRule"
                },
                "Size": {
                    "oneOf": [
                        {
                            "type": "integer",
                            "minimum": 0
                        },
                        {
                            "type": "object",
                            "additionalProperties": false,
                            "properties": {
                                "size": {
                                    "type": "integer",
                                    "minimum": 0
                                },
                                "blocking": {
                                    "type": "boolean"
                                }
                            },
                            "required": ["size"]
                        }
                    ],
                    "title": "Size"
                }
            }
        }
    );

    JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(&schema)
        .expect("A valid schema")
}

/// Checks a decoded definition document against the meta-schema.
pub fn lint(definition: &serde_json::Value, json_schema: &JSONSchema) -> Result<(), Vec<LintError>> {
    match json_schema.validate(definition) {
        Ok(_) => Ok(()),
        Err(errors) => Err(errors
            .map(|error| LintError {
                instance_path: error.instance_path.to_string(),
                error: error.to_string(),
            })
            .collect()),
    }
}
