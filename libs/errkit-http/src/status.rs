//! Loosely typed status code input for `create` and `wrap`

use std::fmt;

use http::StatusCode;

use crate::error::FactoryError;

/// Status code as supplied by a caller.
///
/// Callers of the generic constructors may hand over an integer, a float or a
/// numeric string. Floats are truncated and strings are parsed by their
/// leading integer prefix, so `"404.1"` and `404.9` both resolve to 404.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusArg {
    Code(i64),
    Number(f64),
    Text(String),
}

impl StatusArg {
    /// Resolve into a concrete status code of at least 400.
    ///
    /// # Errors
    /// Returns `FactoryError::InvalidStatus` when the value is not numeric,
    /// not finite or below 400, and `FactoryError::StatusOutOfRange` when it
    /// does not fit a 16-bit status code.
    pub fn resolve(&self) -> Result<u16, FactoryError> {
        let code = match self {
            Self::Code(code) => Some(*code),
            #[allow(clippy::cast_possible_truncation)]
            Self::Number(number) if number.is_finite() => {
                let truncated = number.trunc();
                if truncated.abs() < 9.0e15 {
                    Some(truncated as i64)
                } else {
                    return Err(FactoryError::StatusOutOfRange {
                        value: self.to_string(),
                    });
                }
            }
            Self::Number(_) => None,
            Self::Text(text) => leading_integer(text),
        };

        let code = code
            .filter(|code| *code >= 400)
            .ok_or_else(|| FactoryError::InvalidStatus {
                value: self.to_string(),
            })?;

        u16::try_from(code).map_err(|_| FactoryError::StatusOutOfRange {
            value: self.to_string(),
        })
    }
}

/// Integer prefix of `text` after leading whitespace, if any.
fn leading_integer(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let value = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

impl fmt::Display for StatusArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code(code) => write!(f, "{code}"),
            // Non-finite numbers have no JSON form and render as null
            Self::Number(number) => write!(f, "{}", serde_json::Value::from(*number)),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<u16> for StatusArg {
    fn from(code: u16) -> Self {
        Self::Code(i64::from(code))
    }
}

impl From<i32> for StatusArg {
    fn from(code: i32) -> Self {
        Self::Code(i64::from(code))
    }
}

impl From<i64> for StatusArg {
    fn from(code: i64) -> Self {
        Self::Code(code)
    }
}

impl From<f64> for StatusArg {
    fn from(number: f64) -> Self {
        Self::Number(number)
    }
}

impl From<&str> for StatusArg {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for StatusArg {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<StatusCode> for StatusArg {
    fn from(status: StatusCode) -> Self {
        Self::Code(i64::from(status.as_u16()))
    }
}

/// Canonical reason phrase for `code`, or `Unknown` when there is none.
#[must_use]
pub fn reason_phrase(code: u16) -> &'static str {
    StatusCode::from_u16(code)
        .ok()
        .and_then(|status| status.canonical_reason())
        .unwrap_or("Unknown")
}
