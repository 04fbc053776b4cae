//! Schema trees.
//!
//! A [`Schema`] describes one position of a value tree: the leaf validators
//! to run there, whether null is allowed, and optionally the shape below it
//! (named fields of an object, or the schema shared by all items of a
//! list). Builders consume and return the schema; `clone` gives an
//! independent copy, so a schema can serve as a template for several
//! diverging ones.

use crate::collectors::RawErrorCollector;
use crate::context::Context;
use crate::presenters::{PathPresenter, Presenter, SimpleErrorPresenter};
use crate::validators::{
    IsBoolean, IsInteger, IsList, IsMap, IsNumber, IsString, SchemaValidator, Validator,
};
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("schema already describes {existing}, it cannot also describe {requested}")]
    ConflictingShape {
        existing: &'static str,
        requested: &'static str,
    },
}

/// What happens to object keys that have no field schema.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExtraFields {
    Forbid,
    #[default]
    Ignore,
}

#[derive(Clone, Default)]
pub enum Shape {
    #[default]
    Scalar,
    Object(BTreeMap<String, Schema>),
    Array(Box<Schema>),
}

impl Shape {
    fn describe(&self) -> &'static str {
        match self {
            Shape::Scalar => "a scalar",
            Shape::Object(_) => "an object",
            Shape::Array(_) => "an array",
        }
    }
}

#[derive(Clone, Default)]
pub struct Schema {
    validators: Vec<Arc<dyn Validator>>,
    shape: Shape,
    extra: ExtraFields,
    required: bool,
}

/// A named entry of an object schema.
#[derive(Clone, Debug)]
pub struct Field {
    name: String,
    schema: Schema,
}

impl Field {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: Schema::new(),
        }
    }

    pub fn required(mut self) -> Self {
        self.schema = self.schema.required();
        self
    }

    pub fn optional(mut self) -> Self {
        self.schema = self.schema.optional();
        self
    }

    pub fn with_validator(mut self, validator: impl Validator + 'static) -> Self {
        self.schema = self.schema.with_validator(validator);
        self
    }

    pub fn with_validators(mut self, validators: Vec<Arc<dyn Validator>>) -> Self {
        self.schema = self.schema.with_validators(validators);
        self
    }

    /// Replaces the whole field schema, including its required flag.
    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = schema;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}

impl<K: Into<String>> From<(K, Schema)> for Field {
    fn from((name, schema): (K, Schema)) -> Self {
        Self {
            name: name.into(),
            schema,
        }
    }
}

impl Schema {
    /// An optional schema without validators that accepts everything.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_validators(validators: Vec<Arc<dyn Validator>>) -> Self {
        Self {
            validators,
            ..Self::default()
        }
    }

    pub fn of(validator: impl Validator + 'static) -> Self {
        Self::new().with_validator(validator)
    }

    pub fn string() -> Self {
        Self::of(IsString)
    }

    pub fn integer() -> Self {
        Self::of(IsInteger)
    }

    pub fn number() -> Self {
        Self::of(IsNumber)
    }

    pub fn boolean() -> Self {
        Self::of(IsBoolean)
    }

    pub fn map() -> Self {
        Self::of(IsMap)
    }

    pub fn object<I, F>(fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<Field>,
    {
        Self {
            shape: Shape::Object(collect_fields(fields)),
            ..Self::default()
        }
    }

    /// A list whose every item matches `items`.
    pub fn array(items: Schema) -> Self {
        Self {
            validators: vec![Arc::new(IsList)],
            shape: Shape::Array(Box::new(items)),
            ..Self::default()
        }
    }

    pub fn with_validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validators.push(Arc::new(validator));
        self
    }

    pub fn with_validators(mut self, validators: Vec<Arc<dyn Validator>>) -> Self {
        self.validators = validators;
        self
    }

    pub fn with_fields<I, F>(mut self, fields: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = F>,
        F: Into<Field>,
    {
        if let Shape::Array(_) = self.shape {
            return Err(SchemaError::ConflictingShape {
                existing: self.shape.describe(),
                requested: "an object",
            });
        }

        self.shape = Shape::Object(collect_fields(fields));
        Ok(self)
    }

    pub fn with_items(mut self, items: Schema) -> Result<Self, SchemaError> {
        if let Shape::Object(_) = self.shape {
            return Err(SchemaError::ConflictingShape {
                existing: self.shape.describe(),
                requested: "an array",
            });
        }

        self.shape = Shape::Array(Box::new(items));
        Ok(self)
    }

    pub fn with_extra(mut self, extra: ExtraFields) -> Self {
        self.extra = extra;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn validators(&self) -> &[Arc<dyn Validator>] {
        &self.validators
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn fields(&self) -> Option<&BTreeMap<String, Schema>> {
        match &self.shape {
            Shape::Object(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn items(&self) -> Option<&Schema> {
        match &self.shape {
            Shape::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn extra(&self) -> ExtraFields {
        self.extra
    }

    /// Merges two schemas into a new one. Validators run `self`'s first;
    /// the result is required if either side is, and forbids extra fields
    /// only if both sides do. Fields present on both sides are merged
    /// recursively, as are item schemas.
    pub fn extended_with(&self, other: &Schema) -> Result<Schema, SchemaError> {
        let shape = match (&self.shape, &other.shape) {
            (Shape::Scalar, shape) | (shape, Shape::Scalar) => shape.clone(),
            (Shape::Object(own), Shape::Object(theirs)) => {
                let mut fields = own.clone();
                for (name, schema) in theirs {
                    let merged = match fields.get(name) {
                        Some(existing) => existing.extended_with(schema)?,
                        None => schema.clone(),
                    };
                    fields.insert(name.clone(), merged);
                }
                Shape::Object(fields)
            }
            (Shape::Array(own), Shape::Array(theirs)) => {
                Shape::Array(Box::new(own.extended_with(theirs)?))
            }
            (own, theirs) => {
                return Err(SchemaError::ConflictingShape {
                    existing: own.describe(),
                    requested: theirs.describe(),
                })
            }
        };

        let extra = match (self.extra, other.extra) {
            (ExtraFields::Forbid, ExtraFields::Forbid) => ExtraFields::Forbid,
            _ => ExtraFields::Ignore,
        };

        Ok(Schema {
            validators: self
                .validators
                .iter()
                .chain(other.validators.iter())
                .cloned()
                .collect(),
            shape,
            extra,
            required: self.required || other.required,
        })
    }

    /// Validates with `$`-rooted, dot-joined paths and default messages.
    pub fn validate(&self, ctx: &Context, value: &Value) -> (bool, BTreeMap<String, Vec<String>>) {
        SchemaValidator::new(PathPresenter::new("."), SimpleErrorPresenter).validate(ctx, value, self)
    }

    pub fn validate_with_presenter(
        &self,
        ctx: &Context,
        value: &Value,
        path_presenter: impl Presenter + 'static,
        error_presenter: impl Presenter + 'static,
    ) -> (bool, BTreeMap<String, Vec<String>>) {
        SchemaValidator::new(path_presenter, error_presenter).validate(ctx, value, self)
    }

    pub fn validate_flat(
        &self,
        ctx: &Context,
        value: &Value,
        combiner: impl Presenter + 'static,
    ) -> (bool, Vec<String>) {
        SchemaValidator::new(PathPresenter::new("."), SimpleErrorPresenter)
            .validate_flat(ctx, value, self, combiner)
    }

    /// Validates and keeps the raw `(path, error)` pairs.
    pub fn validate_raw(&self, ctx: &Context, value: &Value) -> RawErrorCollector {
        let mut collector = RawErrorCollector::new();
        SchemaValidator::new(PathPresenter::new("."), SimpleErrorPresenter)
            .validate_into(ctx, value, self, &mut collector);
        collector
    }
}

fn collect_fields<I, F>(fields: I) -> BTreeMap<String, Schema>
where
    I: IntoIterator<Item = F>,
    F: Into<Field>,
{
    fields
        .into_iter()
        .map(|field| {
            let field = field.into();
            (field.name, field.schema)
        })
        .collect()
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("Schema");
        debug
            .field("validators", &self.validators.len())
            .field("required", &self.required)
            .field("extra", &self.extra);
        match &self.shape {
            Shape::Scalar => {}
            Shape::Object(fields) => {
                debug.field("fields", fields);
            }
            Shape::Array(items) => {
                debug.field("items", items);
            }
        }
        debug.finish()
    }
}
