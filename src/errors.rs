//! Validation error taxonomy.
//!
//! Errors are plain values: leaf validators return them, the engine hands
//! them to a collector, presenters render them. The `Display` impl is the
//! default ("simple") message.

use crate::value::Value;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("required")]
    Required,

    #[error("not a string")]
    NotAString,

    #[error("not an integer")]
    NotAnInteger,

    #[error("not a float")]
    NotAFloat,

    #[error("not a number")]
    NotANumber,

    #[error("not a boolean")]
    NotABoolean,

    #[error("not a map")]
    NotAMap,

    #[error("not an object")]
    NotAnObject,

    #[error("not a list")]
    NotAList,

    #[error("not a value")]
    NotAValue,

    #[error("min size {min_size}, actual size {actual_size}")]
    MinSize { min_size: usize, actual_size: usize },

    #[error("max size {max_size}, actual size {actual_size}")]
    MaxSize { max_size: usize, actual_size: usize },

    #[error("expected precision {expected_precision}, actual precision {actual_precision}")]
    FloatPrecision {
        expected_precision: usize,
        actual_precision: usize,
    },

    #[error("value is less than min")]
    FloatTooSmall { min_float: f64 },

    #[error("value is greater than max")]
    FloatTooLarge { max_float: f64 },

    #[error("expected at least {min_length} characters")]
    StringTooShort { min_length: usize },

    #[error("expected at most {max_length} characters, got {actual_length}")]
    StringTooLong {
        max_length: usize,
        actual_length: usize,
    },

    #[error("field {field} not defined")]
    FieldNotDefined { field: String },

    #[error("unexpected field {field}")]
    UnexpectedField { field: String },

    #[error("invalid option: {actual}, expected one of {}", render_options(.options))]
    InvalidOption { options: Vec<Value>, actual: Value },

    #[error("\"{actual}\" does not match \"{pattern}\"")]
    PatternMismatch { pattern: String, actual: String },

    #[error("\"{input}\" is not lower cased")]
    NotLowerCased { input: String },

    #[error("\"{input}\" is not upper cased")]
    NotUpperCased { input: String },

    #[error("invalid email address{}", render_reason(.reason))]
    InvalidEmail {
        value: String,
        reason: Option<String>,
    },

    #[error("invalid URL")]
    InvalidUrl { value: String },

    #[error("invalid UUID")]
    InvalidUuid { value: String },

    #[error("invalid XID")]
    InvalidXid { value: String },

    #[error("invalid base64")]
    InvalidBase64 { value: String },

    #[error("invalid JSON")]
    InvalidJson { value: String },

    #[error("invalid IPv4 address")]
    InvalidIpv4 { value: String },

    #[error("invalid IPv6 address")]
    InvalidIpv6 { value: String },

    /// Raised by caller-authored validators.
    #[error("{message}")]
    Custom { code: String, message: String },
}

/// Fieldless discriminant of [`ValidationError`], used for dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ErrorKind {
    Required,
    NotAString,
    NotAnInteger,
    NotAFloat,
    NotANumber,
    NotABoolean,
    NotAMap,
    NotAnObject,
    NotAList,
    NotAValue,
    MinSize,
    MaxSize,
    FloatPrecision,
    FloatTooSmall,
    FloatTooLarge,
    StringTooShort,
    StringTooLong,
    FieldNotDefined,
    UnexpectedField,
    InvalidOption,
    PatternMismatch,
    NotLowerCased,
    NotUpperCased,
    InvalidEmail,
    InvalidUrl,
    InvalidUuid,
    InvalidXid,
    InvalidBase64,
    InvalidJson,
    InvalidIpv4,
    InvalidIpv6,
    Custom,
}

impl ErrorKind {
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::Required => "RequiredError",
            ErrorKind::NotAString => "NotAStringError",
            ErrorKind::NotAnInteger => "NotAnIntegerError",
            ErrorKind::NotAFloat => "NotAFloatError",
            ErrorKind::NotANumber => "NotANumberError",
            ErrorKind::NotABoolean => "NotABooleanError",
            ErrorKind::NotAMap => "NotAMapError",
            ErrorKind::NotAnObject => "NotAnObjectError",
            ErrorKind::NotAList => "NotAListError",
            ErrorKind::NotAValue => "NotAValueError",
            ErrorKind::MinSize => "MinSizeError",
            ErrorKind::MaxSize => "MaxSizeError",
            ErrorKind::FloatPrecision => "FloatPrecisionError",
            ErrorKind::FloatTooSmall => "FloatTooSmallError",
            ErrorKind::FloatTooLarge => "FloatTooLargeError",
            ErrorKind::StringTooShort => "StringTooShortError",
            ErrorKind::StringTooLong => "StringTooLongError",
            ErrorKind::FieldNotDefined => "FieldNotDefinedError",
            ErrorKind::UnexpectedField => "UnexpectedFieldError",
            ErrorKind::InvalidOption => "InvalidOptionError",
            ErrorKind::PatternMismatch => "ValueNotMatchingPatternError",
            ErrorKind::NotLowerCased => "NotLowerCasedError",
            ErrorKind::NotUpperCased => "NotUpperCasedError",
            ErrorKind::InvalidEmail => "InvalidEmailError",
            ErrorKind::InvalidUrl => "InvalidURLError",
            ErrorKind::InvalidUuid => "InvalidUUIDError",
            ErrorKind::InvalidXid => "InvalidXIDError",
            ErrorKind::InvalidBase64 => "InvalidBase64Error",
            ErrorKind::InvalidJson => "InvalidJSONError",
            ErrorKind::InvalidIpv4 => "InvalidIPv4Error",
            ErrorKind::InvalidIpv6 => "InvalidIPv6Error",
            ErrorKind::Custom => "CustomError",
        }
    }
}

impl ValidationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationError::Required => ErrorKind::Required,
            ValidationError::NotAString => ErrorKind::NotAString,
            ValidationError::NotAnInteger => ErrorKind::NotAnInteger,
            ValidationError::NotAFloat => ErrorKind::NotAFloat,
            ValidationError::NotANumber => ErrorKind::NotANumber,
            ValidationError::NotABoolean => ErrorKind::NotABoolean,
            ValidationError::NotAMap => ErrorKind::NotAMap,
            ValidationError::NotAnObject => ErrorKind::NotAnObject,
            ValidationError::NotAList => ErrorKind::NotAList,
            ValidationError::NotAValue => ErrorKind::NotAValue,
            ValidationError::MinSize { .. } => ErrorKind::MinSize,
            ValidationError::MaxSize { .. } => ErrorKind::MaxSize,
            ValidationError::FloatPrecision { .. } => ErrorKind::FloatPrecision,
            ValidationError::FloatTooSmall { .. } => ErrorKind::FloatTooSmall,
            ValidationError::FloatTooLarge { .. } => ErrorKind::FloatTooLarge,
            ValidationError::StringTooShort { .. } => ErrorKind::StringTooShort,
            ValidationError::StringTooLong { .. } => ErrorKind::StringTooLong,
            ValidationError::FieldNotDefined { .. } => ErrorKind::FieldNotDefined,
            ValidationError::UnexpectedField { .. } => ErrorKind::UnexpectedField,
            ValidationError::InvalidOption { .. } => ErrorKind::InvalidOption,
            ValidationError::PatternMismatch { .. } => ErrorKind::PatternMismatch,
            ValidationError::NotLowerCased { .. } => ErrorKind::NotLowerCased,
            ValidationError::NotUpperCased { .. } => ErrorKind::NotUpperCased,
            ValidationError::InvalidEmail { .. } => ErrorKind::InvalidEmail,
            ValidationError::InvalidUrl { .. } => ErrorKind::InvalidUrl,
            ValidationError::InvalidUuid { .. } => ErrorKind::InvalidUuid,
            ValidationError::InvalidXid { .. } => ErrorKind::InvalidXid,
            ValidationError::InvalidBase64 { .. } => ErrorKind::InvalidBase64,
            ValidationError::InvalidJson { .. } => ErrorKind::InvalidJson,
            ValidationError::InvalidIpv4 { .. } => ErrorKind::InvalidIpv4,
            ValidationError::InvalidIpv6 { .. } => ErrorKind::InvalidIpv6,
            ValidationError::Custom { .. } => ErrorKind::Custom,
        }
    }

    pub fn custom(code: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError::Custom {
            code: code.into(),
            message: message.into(),
        }
    }
}

fn render_options(options: &[Value]) -> String {
    Value::List(options.to_vec()).to_string()
}

fn render_reason(reason: &Option<String>) -> String {
    match reason {
        Some(reason) => format!(": {}", reason),
        None => String::new(),
    }
}
