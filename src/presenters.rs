//! Rendering of `(path, error)` pairs.
//!
//! Presenters are pure: the same input always renders the same string.
//! They compose by wrapping one another rather than by sharing state.

use crate::context::Context;
use crate::errors::{ErrorKind, ValidationError};
use serde_json::{json, Map};
use std::collections::HashMap;
use std::sync::Arc;

pub trait Presenter: Send + Sync {
    fn present(&self, ctx: &Context, path: &[String], error: &ValidationError) -> String;
}

impl<F> Presenter for F
where
    F: Fn(&Context, &[String], &ValidationError) -> String + Send + Sync,
{
    fn present(&self, ctx: &Context, path: &[String], error: &ValidationError) -> String {
        self(ctx, path, error)
    }
}

fn is_index_segment(segment: &str) -> bool {
    segment.starts_with('[') && segment.ends_with(']')
}

/// Joins path segments with `glue`; `glue` is never placed in front of an
/// index segment, so lists render as `$.items[2]`.
#[derive(Debug, Clone)]
pub struct PathPresenter {
    glue: String,
}

impl PathPresenter {
    pub fn new(glue: impl Into<String>) -> Self {
        Self { glue: glue.into() }
    }

    pub fn render(&self, path: &[String]) -> String {
        path.join(&self.glue)
            .replace(&format!("{}[", self.glue), "[")
    }
}

impl Presenter for PathPresenter {
    fn present(&self, _ctx: &Context, path: &[String], _error: &ValidationError) -> String {
        self.render(path)
    }
}

/// The error's own message.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleErrorPresenter;

impl Presenter for SimpleErrorPresenter {
    fn present(&self, _ctx: &Context, _path: &[String], error: &ValidationError) -> String {
        error.to_string()
    }
}

/// Sentences meant for end users.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetailedErrorPresenter;

impl Presenter for DetailedErrorPresenter {
    fn present(&self, _ctx: &Context, _path: &[String], error: &ValidationError) -> String {
        match error {
            ValidationError::Required => "this field is required".to_string(),
            ValidationError::NotAString => "value must be a string".to_string(),
            ValidationError::NotAnInteger => "value must be a whole number".to_string(),
            ValidationError::NotAFloat => "value must be a number".to_string(),
            ValidationError::NotANumber => "value must be numeric".to_string(),
            ValidationError::NotABoolean => "value must be true or false".to_string(),
            ValidationError::NotAMap | ValidationError::NotAnObject => {
                "value must be an object".to_string()
            }
            ValidationError::NotAList => "value must be a list".to_string(),
            ValidationError::NotAValue => "value is required".to_string(),
            ValidationError::MinSize {
                min_size,
                actual_size,
            } => format!(
                "list must contain at least {} item(s) (got {})",
                min_size, actual_size
            ),
            ValidationError::MaxSize {
                max_size,
                actual_size,
            } => format!(
                "list must contain at most {} item(s) (got {})",
                max_size, actual_size
            ),
            ValidationError::FloatPrecision {
                expected_precision,
                actual_precision,
            } => format!(
                "number must have at most {} decimal place(s) (got {})",
                expected_precision, actual_precision
            ),
            ValidationError::FloatTooSmall { min_float } => {
                format!("value must be at least {:.2}", min_float)
            }
            ValidationError::FloatTooLarge { max_float } => {
                format!("value must be at most {:.2}", max_float)
            }
            ValidationError::StringTooShort { min_length } => {
                format!("text must be at least {} character(s) long", min_length)
            }
            ValidationError::StringTooLong { max_length, .. } => {
                format!("text must be at most {} character(s) long", max_length)
            }
            ValidationError::FieldNotDefined { field } => {
                format!("field '{}' is required", field)
            }
            ValidationError::UnexpectedField { field } => {
                format!("unexpected field '{}'", field)
            }
            ValidationError::InvalidOption { .. } => {
                "value is not one of the allowed options".to_string()
            }
            ValidationError::PatternMismatch { .. } => {
                "text does not have the expected format".to_string()
            }
            ValidationError::NotLowerCased { .. } => "text must be lower case".to_string(),
            ValidationError::NotUpperCased { .. } => "text must be upper case".to_string(),
            ValidationError::InvalidEmail { .. } => "value must be an email address".to_string(),
            ValidationError::InvalidUrl { .. } => "value must be a URL".to_string(),
            ValidationError::InvalidUuid { .. } => "value must be a UUID".to_string(),
            ValidationError::InvalidXid { .. } => "value must be an XID".to_string(),
            ValidationError::InvalidBase64 { .. } => {
                "value must be base64 encoded".to_string()
            }
            ValidationError::InvalidJson { .. } => "value must be valid JSON".to_string(),
            ValidationError::InvalidIpv4 { .. } => "value must be an IPv4 address".to_string(),
            ValidationError::InvalidIpv6 { .. } => "value must be an IPv6 address".to_string(),
            ValidationError::Custom { message, .. } => message.clone(),
        }
    }
}

/// Kind name plus every field, for diagnostics.
#[derive(Debug, Clone, Copy, Default)]
pub struct VerboseErrorPresenter;

impl Presenter for VerboseErrorPresenter {
    fn present(&self, _ctx: &Context, _path: &[String], error: &ValidationError) -> String {
        let name = error.kind().name();
        let details = match error {
            ValidationError::MinSize {
                min_size,
                actual_size,
            } => format!(
                "expected minimum size {}, actual size {}",
                min_size, actual_size
            ),
            ValidationError::MaxSize {
                max_size,
                actual_size,
            } => format!(
                "expected maximum size {}, actual size {}",
                max_size, actual_size
            ),
            ValidationError::FloatPrecision {
                expected_precision,
                actual_precision,
            } => format!(
                "expected precision {}, actual precision {}",
                expected_precision, actual_precision
            ),
            ValidationError::FloatTooSmall { min_float } => {
                format!("minimum allowed value is {:.6}", min_float)
            }
            ValidationError::FloatTooLarge { max_float } => {
                format!("maximum allowed value is {:.6}", max_float)
            }
            ValidationError::StringTooShort { min_length } => {
                format!("minimum length is {} characters", min_length)
            }
            ValidationError::StringTooLong {
                max_length,
                actual_length,
            } => format!(
                "maximum length is {} characters, actual length {}",
                max_length, actual_length
            ),
            ValidationError::FieldNotDefined { field } => {
                format!("field '{}' is not defined", field)
            }
            ValidationError::UnexpectedField { field } => {
                format!("field '{}' is not allowed", field)
            }
            ValidationError::Custom { code, message } => format!("[{}] {}", code, message),
            ValidationError::Required
            | ValidationError::NotAString
            | ValidationError::NotAnInteger
            | ValidationError::NotAFloat
            | ValidationError::NotANumber
            | ValidationError::NotABoolean
            | ValidationError::NotAMap
            | ValidationError::NotAnObject
            | ValidationError::NotAList
            | ValidationError::NotAValue
            | ValidationError::InvalidOption { .. }
            | ValidationError::PatternMismatch { .. }
            | ValidationError::NotLowerCased { .. }
            | ValidationError::NotUpperCased { .. }
            | ValidationError::InvalidEmail { .. }
            | ValidationError::InvalidUrl { .. }
            | ValidationError::InvalidUuid { .. }
            | ValidationError::InvalidXid { .. }
            | ValidationError::InvalidBase64 { .. }
            | ValidationError::InvalidJson { .. }
            | ValidationError::InvalidIpv4 { .. }
            | ValidationError::InvalidIpv6 { .. } => error.to_string(),
        };

        format!("{}: {}", name, details)
    }
}

/// `path + separator + message`. The message presenter defaults to
/// [`SimpleErrorPresenter`].
#[derive(Clone)]
pub struct CombinedPresenter {
    path: PathPresenter,
    separator: String,
    messages: Arc<dyn Presenter>,
}

impl CombinedPresenter {
    pub fn new(glue: impl Into<String>, separator: impl Into<String>) -> Self {
        Self {
            path: PathPresenter::new(glue),
            separator: separator.into(),
            messages: Arc::new(SimpleErrorPresenter),
        }
    }

    pub fn with_messages(mut self, messages: impl Presenter + 'static) -> Self {
        self.messages = Arc::new(messages);
        self
    }
}

impl Presenter for CombinedPresenter {
    fn present(&self, ctx: &Context, path: &[String], error: &ValidationError) -> String {
        let rendered_path = self.path.present(ctx, path, error);
        let message = self.messages.present(ctx, path, error);

        if rendered_path.is_empty() {
            return message;
        }

        format!("{}{}{}", rendered_path, self.separator, message)
    }
}

/// Like [`CombinedPresenter`] but builds the path segment by segment: the
/// first segment is written as is and bracketed segments are appended
/// without glue.
#[derive(Debug, Clone)]
pub struct CombinedBracketPresenter {
    glue: String,
    separator: String,
}

impl CombinedBracketPresenter {
    pub fn new(glue: impl Into<String>, separator: impl Into<String>) -> Self {
        Self {
            glue: glue.into(),
            separator: separator.into(),
        }
    }
}

impl Presenter for CombinedBracketPresenter {
    fn present(&self, _ctx: &Context, path: &[String], error: &ValidationError) -> String {
        if path.is_empty() {
            return error.to_string();
        }

        let mut rendered = String::new();
        for (i, segment) in path.iter().enumerate() {
            if i > 0 && !is_index_segment(segment) {
                rendered.push_str(&self.glue);
            }
            rendered.push_str(segment);
        }

        format!("{}{}{}", rendered, self.separator, error)
    }
}

/// `{"message": .., "path": ..}` as a JSON string.
#[derive(Debug, Clone)]
pub struct JsonPresenter {
    path: PathPresenter,
}

impl JsonPresenter {
    pub fn new(glue: impl Into<String>) -> Self {
        Self {
            path: PathPresenter::new(glue),
        }
    }
}

impl Presenter for JsonPresenter {
    fn present(&self, _ctx: &Context, path: &[String], error: &ValidationError) -> String {
        json!({
            "path": self.path.render(path),
            "message": error.to_string(),
        })
        .to_string()
    }
}

/// JSON record with the error kind and its fields.
#[derive(Debug, Clone)]
pub struct JsonDetailedPresenter {
    path: PathPresenter,
}

impl JsonDetailedPresenter {
    pub fn new(glue: impl Into<String>) -> Self {
        Self {
            path: PathPresenter::new(glue),
        }
    }

    pub fn record(&self, path: &[String], error: &ValidationError) -> serde_json::Value {
        let mut record = Map::new();
        record.insert("path".into(), json!(self.path.render(path)));
        record.insert("message".into(), json!(error.to_string()));
        record.insert("kind".into(), json!(error.kind().name()));

        match error {
            ValidationError::MinSize {
                min_size,
                actual_size,
            } => {
                record.insert("minSize".into(), json!(min_size));
                record.insert("actualSize".into(), json!(actual_size));
            }
            ValidationError::MaxSize {
                max_size,
                actual_size,
            } => {
                record.insert("maxSize".into(), json!(max_size));
                record.insert("actualSize".into(), json!(actual_size));
            }
            ValidationError::FloatPrecision {
                expected_precision,
                actual_precision,
            } => {
                record.insert("expectedPrecision".into(), json!(expected_precision));
                record.insert("actualPrecision".into(), json!(actual_precision));
            }
            ValidationError::FloatTooSmall { min_float } => {
                record.insert("minFloat".into(), json!(min_float));
            }
            ValidationError::FloatTooLarge { max_float } => {
                record.insert("maxFloat".into(), json!(max_float));
            }
            ValidationError::StringTooShort { min_length } => {
                record.insert("minLength".into(), json!(min_length));
            }
            ValidationError::StringTooLong {
                max_length,
                actual_length,
            } => {
                record.insert("maxLength".into(), json!(max_length));
                record.insert("actualLength".into(), json!(actual_length));
            }
            ValidationError::FieldNotDefined { field }
            | ValidationError::UnexpectedField { field } => {
                record.insert("field".into(), json!(field));
            }
            ValidationError::InvalidOption { options, actual } => {
                record.insert("options".into(), json!(options));
                record.insert("actual".into(), json!(actual));
            }
            ValidationError::PatternMismatch { pattern, actual } => {
                record.insert("pattern".into(), json!(pattern));
                record.insert("actual".into(), json!(actual));
            }
            ValidationError::NotLowerCased { input } | ValidationError::NotUpperCased { input } => {
                record.insert("input".into(), json!(input));
            }
            ValidationError::InvalidEmail { value, reason } => {
                record.insert("value".into(), json!(value));
                if let Some(reason) = reason {
                    record.insert("reason".into(), json!(reason));
                }
            }
            ValidationError::InvalidUrl { value }
            | ValidationError::InvalidUuid { value }
            | ValidationError::InvalidXid { value }
            | ValidationError::InvalidBase64 { value }
            | ValidationError::InvalidJson { value }
            | ValidationError::InvalidIpv4 { value }
            | ValidationError::InvalidIpv6 { value } => {
                record.insert("value".into(), json!(value));
            }
            ValidationError::Custom { code, .. } => {
                record.insert("code".into(), json!(code));
            }
            ValidationError::Required
            | ValidationError::NotAString
            | ValidationError::NotAnInteger
            | ValidationError::NotAFloat
            | ValidationError::NotANumber
            | ValidationError::NotABoolean
            | ValidationError::NotAMap
            | ValidationError::NotAnObject
            | ValidationError::NotAList
            | ValidationError::NotAValue => {}
        }

        serde_json::Value::Object(record)
    }
}

impl Presenter for JsonDetailedPresenter {
    fn present(&self, _ctx: &Context, path: &[String], error: &ValidationError) -> String {
        self.record(path, error).to_string()
    }
}

/// Dispatches on the error kind to a registered presenter, falling back
/// for kinds nobody registered.
#[derive(Clone)]
pub struct RegistryPresenter {
    registry: HashMap<ErrorKind, Arc<dyn Presenter>>,
    fallback: Arc<dyn Presenter>,
}

impl RegistryPresenter {
    pub fn new(fallback: impl Presenter + 'static) -> Self {
        Self {
            registry: HashMap::new(),
            fallback: Arc::new(fallback),
        }
    }

    pub fn register(mut self, kind: ErrorKind, presenter: impl Presenter + 'static) -> Self {
        self.registry.insert(kind, Arc::new(presenter));
        self
    }
}

impl Presenter for RegistryPresenter {
    fn present(&self, ctx: &Context, path: &[String], error: &ValidationError) -> String {
        match self.registry.get(&error.kind()) {
            Some(presenter) => presenter.present(ctx, path, error),
            None => self.fallback.present(ctx, path, error),
        }
    }
}
