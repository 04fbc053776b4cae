use crate::schema::{ExtraFields, SchemaError};
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// A schema definition as written in YAML or JSON.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct Definition {
    #[serde(rename = "type")]
    pub kind: Option<Kind>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub extra: ExtraFields,
    #[serde(default)]
    pub rules: Vec<Rule>,
    pub fields: Option<BTreeMap<String, Definition>>,
    pub items: Option<Box<Definition>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    String,
    Integer,
    Number,
    Float,
    Boolean,
    Map,
    List,
}

impl Kind {
    pub fn name(&self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::Integer => "integer",
            Kind::Number => "number",
            Kind::Float => "float",
            Kind::Boolean => "boolean",
            Kind::Map => "map",
            Kind::List => "list",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    MinLength(usize),
    MaxLength(usize),
    Pattern(String),
    OneOf(Vec<Value>),
    MinSize(SizeRule),
    MaxSize(SizeRule),
    Min(f64),
    Max(f64),
    Precision(usize),
    Email,
    Url,
    Uuid,
    Xid,
    Ipv4,
    Ipv6,
    Base64,
    Json,
    LowerCase,
    UpperCase,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(untagged)]
pub enum SizeRule {
    Size(usize),
    Detailed {
        size: usize,
        #[serde(default)]
        blocking: bool,
    },
}

impl SizeRule {
    pub fn size(&self) -> usize {
        match self {
            SizeRule::Size(size) | SizeRule::Detailed { size, .. } => *size,
        }
    }

    pub fn is_blocking(&self) -> bool {
        matches!(self, SizeRule::Detailed { blocking: true, .. })
    }
}

/// A meta-schema violation, located by JSON pointer into the definition.
#[derive(Debug, Clone, PartialEq)]
pub struct LintError {
    pub instance_path: String,
    pub error: String,
}

#[derive(Error, Debug)]
pub enum DefinitionError {
    #[error("Parse error - {0}")]
    Parse(String),
    #[error("{} problem(s) found in schema definition", .0.len())]
    Invalid(Vec<LintError>),
    #[error("{path} - invalid pattern: {source}")]
    Pattern {
        path: String,
        #[source]
        source: regex::Error,
    },
    #[error("{path} - {source}")]
    Shape {
        path: String,
        #[source]
        source: SchemaError,
    },
}
