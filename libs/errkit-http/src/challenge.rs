//! `WWW-Authenticate` challenge assembly for 401 errors

use serde_json::{Map, Value};

use crate::error::FactoryError;

/// Authentication challenge attached to an `unauthorized` error.
#[derive(Debug, Clone, PartialEq)]
pub enum Challenge {
    /// A single scheme, optionally with `key="value"` attributes
    Scheme {
        scheme: String,
        attributes: Option<Map<String, Value>>,
    },
    /// Complete challenges joined as-is with `", "`
    Schemes(Vec<String>),
}

impl Challenge {
    #[must_use]
    pub fn scheme(scheme: impl Into<String>) -> Self {
        Self::Scheme {
            scheme: scheme.into(),
            attributes: None,
        }
    }

    #[must_use]
    pub fn with_attributes(scheme: impl Into<String>, attributes: Map<String, Value>) -> Self {
        Self::Scheme {
            scheme: scheme.into(),
            attributes: Some(attributes),
        }
    }
}

/// Rendered challenge: header text plus the attributes mirrored into the payload.
#[derive(Debug)]
pub(crate) struct RenderedChallenge {
    pub header: String,
    pub attributes: Option<Map<String, Value>>,
    pub missing: bool,
}

pub(crate) fn render(
    challenge: Challenge,
    message: &str,
) -> Result<RenderedChallenge, FactoryError> {
    match challenge {
        Challenge::Schemes(schemes) => Ok(RenderedChallenge {
            header: schemes.join(", "),
            attributes: None,
            missing: false,
        }),
        Challenge::Scheme { scheme, attributes } => {
            let mut header = scheme;
            let mut mirrored =
                (attributes.is_some() || !message.is_empty()).then(Map::<String, Value>::new);

            let has_attributes = attributes.is_some();
            if let Some(attributes) = attributes {
                for (i, (name, value)) in attributes.into_iter().enumerate() {
                    if i > 0 {
                        header.push(',');
                    }
                    let value = match value {
                        Value::Null => Value::String(String::new()),
                        other => other,
                    };
                    let text = match &value {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    header.push(' ');
                    header.push_str(&name);
                    header.push_str("=\"");
                    header.push_str(&escape_attribute(&text)?);
                    header.push('"');
                    if let Some(mirrored) = mirrored.as_mut() {
                        mirrored.insert(name, value);
                    }
                }
            }

            let missing = message.is_empty();
            if !missing {
                if has_attributes {
                    header.push(',');
                }
                header.push_str(" error=\"");
                header.push_str(&escape_attribute(message)?);
                header.push('"');
                if let Some(mirrored) = mirrored.as_mut() {
                    mirrored.insert("error".to_owned(), Value::String(message.to_owned()));
                }
            }

            Ok(RenderedChallenge {
                header,
                attributes: mirrored,
                missing,
            })
        }
    }
}

/// Quote-escape a header attribute value; only printable ASCII is accepted.
fn escape_attribute(value: &str) -> Result<String, FactoryError> {
    if !value.chars().all(|c| c == ' ' || c.is_ascii_graphic()) {
        return Err(FactoryError::InvalidHeaderAttribute {
            value: value.to_owned(),
        });
    }
    Ok(value.replace('\\', "\\\\").replace('"', "\\\""))
}
