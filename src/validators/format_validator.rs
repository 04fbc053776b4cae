//! String format checks. All of them stop on a non-string value and report
//! a malformed string without stopping.

use super::{Outcome, Validator};
use crate::context::Context;
use crate::errors::ValidationError;
use crate::value::Value;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use regex::Regex;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::LazyLock;

static EMAIL_LOCAL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+$").expect("Invalid email local part regex")
});

static EMAIL_DOMAIN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("Invalid email domain regex")
});

/// Versions 1-5, RFC 4122 variant.
static UUID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[1-5][0-9a-fA-F]{3}-[89abAB][0-9a-fA-F]{3}-[0-9a-fA-F]{12}$",
    )
    .expect("Invalid UUID regex")
});

/// 12 bytes in base32hex: 20 lowercase characters.
static XID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-v]{20}$").expect("Invalid XID regex"));

const LENIENT: GeneralPurposeConfig = GeneralPurposeConfig::new()
    .with_decode_allow_trailing_bits(true)
    .with_decode_padding_mode(DecodePaddingMode::Indifferent);

const LENIENT_STANDARD: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);

const LENIENT_URL_SAFE: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);

macro_rules! string_or_stop {
    ($value:expr) => {
        match $value.as_str() {
            Some(s) => s,
            None => return Outcome::stop(ValidationError::NotAString),
        }
    };
}

pub struct Regexp {
    pattern: Regex,
}

impl Regexp {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }
}

impl From<Regex> for Regexp {
    fn from(pattern: Regex) -> Self {
        Self { pattern }
    }
}

impl Validator for Regexp {
    fn validate(&self, _ctx: &Context, value: &Value) -> Outcome {
        let s = string_or_stop!(value);

        if !self.pattern.is_match(s) {
            return Outcome::fail(ValidationError::PatternMismatch {
                pattern: self.pattern.as_str().to_string(),
                actual: s.to_string(),
            });
        }

        Outcome::pass()
    }
}

/// Accepts `local@domain` and the `Display Name <local@domain>` form.
///
/// The local part is a dot-atom or a quoted string. The display name is a
/// quoted string or a run of atoms. Comments and domain literals are not
/// supported.
pub struct Email;

fn is_quoted_string(s: &str) -> bool {
    let Some(inner) = s
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    else {
        return false;
    };

    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if chars.next().is_none() {
                    return false;
                }
            }
            '"' => return false,
            c if c.is_control() => return false,
            _ => {}
        }
    }

    true
}

impl Email {
    fn check_display_name(name: &str) -> Result<(), String> {
        let name = name.trim();
        let valid = name.is_empty()
            || is_quoted_string(name)
            || name
                .split_whitespace()
                .all(|word| EMAIL_LOCAL_REGEX.is_match(word));

        match valid {
            true => Ok(()),
            false => Err("invalid display name".to_string()),
        }
    }

    fn check(address: &str) -> Result<(), String> {
        let address = address.trim();
        let address = match (address.find('<'), address.strip_suffix('>')) {
            (Some(open), Some(inner)) => {
                Email::check_display_name(&address[..open])?;
                &inner[open + 1..]
            }
            _ => address,
        };

        let (local, domain) = address
            .rsplit_once('@')
            .ok_or_else(|| "missing '@'".to_string())?;

        if !is_quoted_string(local) {
            if local.is_empty() || !EMAIL_LOCAL_REGEX.is_match(local) {
                return Err("invalid local part".to_string());
            }
            if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
                return Err("invalid local part".to_string());
            }
        }
        if !EMAIL_DOMAIN_REGEX.is_match(domain) {
            return Err("invalid domain".to_string());
        }

        Ok(())
    }
}

impl Validator for Email {
    fn validate(&self, _ctx: &Context, value: &Value) -> Outcome {
        let s = string_or_stop!(value);

        match Email::check(s) {
            Ok(()) => Outcome::pass(),
            Err(reason) => Outcome::fail(ValidationError::InvalidEmail {
                value: s.to_string(),
                reason: Some(reason),
            }),
        }
    }
}

/// Absolute URL with a scheme and a host, written out as `scheme://`.
///
/// Parsing alone is too forgiving: it trims and drops whitespace, reads `\\`
/// as `/` and fills in a missing `//`, so the raw text is checked too.
pub struct Url;

impl Url {
    fn check(s: &str) -> bool {
        if s.chars().any(|c| c.is_ascii_whitespace() || c.is_control() || c == '\\') {
            return false;
        }

        url::Url::parse(s)
            .map(|parsed| {
                let prefix = format!("{}://", parsed.scheme());
                parsed.has_host()
                    && s.get(..prefix.len())
                        .is_some_and(|head| head.eq_ignore_ascii_case(&prefix))
            })
            .unwrap_or(false)
    }
}

impl Validator for Url {
    fn validate(&self, _ctx: &Context, value: &Value) -> Outcome {
        let s = string_or_stop!(value);
        let valid = Url::check(s);

        if !valid {
            return Outcome::fail(ValidationError::InvalidUrl {
                value: s.to_string(),
            });
        }

        Outcome::pass()
    }
}

pub struct Uuid;

impl Validator for Uuid {
    fn validate(&self, _ctx: &Context, value: &Value) -> Outcome {
        let s = string_or_stop!(value);

        if !UUID_REGEX.is_match(s) {
            return Outcome::fail(ValidationError::InvalidUuid {
                value: s.to_string(),
            });
        }

        Outcome::pass()
    }
}

pub struct Xid;

impl Validator for Xid {
    fn validate(&self, _ctx: &Context, value: &Value) -> Outcome {
        let s = string_or_stop!(value);

        if !XID_REGEX.is_match(s) {
            return Outcome::fail(ValidationError::InvalidXid {
                value: s.to_string(),
            });
        }

        Outcome::pass()
    }
}

fn split_cidr(s: &str, max_prefix: u8) -> Option<&str> {
    match s.split_once('/') {
        None => Some(s),
        Some((address, prefix)) => match prefix.parse::<u8>() {
            Ok(bits) if bits <= max_prefix && !prefix.starts_with('+') => Some(address),
            _ => None,
        },
    }
}

/// Dotted-quad address, optionally in CIDR notation.
pub struct Ipv4;

impl Validator for Ipv4 {
    fn validate(&self, _ctx: &Context, value: &Value) -> Outcome {
        let s = string_or_stop!(value);

        let valid = split_cidr(s, 32)
            .map(|address| address.parse::<Ipv4Addr>().is_ok())
            .unwrap_or(false);

        if !valid {
            return Outcome::fail(ValidationError::InvalidIpv4 {
                value: s.to_string(),
            });
        }

        Outcome::pass()
    }
}

/// IPv6 address, optionally in CIDR notation. IPv4-mapped addresses
/// (`::ffff:a.b.c.d`) count as IPv4 and are rejected.
pub struct Ipv6;

impl Validator for Ipv6 {
    fn validate(&self, _ctx: &Context, value: &Value) -> Outcome {
        let s = string_or_stop!(value);

        let valid = split_cidr(s, 128)
            .and_then(|address| address.parse::<Ipv6Addr>().ok())
            .is_some_and(|address| address.to_ipv4_mapped().is_none());

        if !valid {
            return Outcome::fail(ValidationError::InvalidIpv6 {
                value: s.to_string(),
            });
        }

        Outcome::pass()
    }
}

/// Standard or URL-safe alphabet, with or without padding. Line breaks
/// are skipped and non-zero trailing bits are tolerated. The empty string
/// is rejected.
pub struct Base64;

impl Validator for Base64 {
    fn validate(&self, _ctx: &Context, value: &Value) -> Outcome {
        let s = string_or_stop!(value);
        let stripped: String = s.chars().filter(|c| !matches!(c, '\r' | '\n')).collect();

        let valid = !stripped.is_empty()
            && [LENIENT_STANDARD, LENIENT_URL_SAFE]
                .iter()
                .any(|engine| engine.decode(&stripped).is_ok());

        if !valid {
            return Outcome::fail(ValidationError::InvalidBase64 {
                value: s.to_string(),
            });
        }

        Outcome::pass()
    }
}

/// The string holds a complete JSON document of any kind.
pub struct Json;

impl Validator for Json {
    fn validate(&self, _ctx: &Context, value: &Value) -> Outcome {
        let s = string_or_stop!(value);

        if serde_json::from_str::<serde::de::IgnoredAny>(s).is_err() {
            return Outcome::fail(ValidationError::InvalidJson {
                value: s.to_string(),
            });
        }

        Outcome::pass()
    }
}

pub struct LowerCase;

impl Validator for LowerCase {
    fn validate(&self, _ctx: &Context, value: &Value) -> Outcome {
        let s = string_or_stop!(value);

        if s != s.to_lowercase() {
            return Outcome::fail(ValidationError::NotLowerCased {
                input: s.to_string(),
            });
        }

        Outcome::pass()
    }
}

pub struct UpperCase;

impl Validator for UpperCase {
    fn validate(&self, _ctx: &Context, value: &Value) -> Outcome {
        let s = string_or_stop!(value);

        if s != s.to_uppercase() {
            return Outcome::fail(ValidationError::NotUpperCased {
                input: s.to_string(),
            });
        }

        Outcome::pass()
    }
}
