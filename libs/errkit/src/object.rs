//! JSON:API error object members

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Names of the members owned by [`ErrorObject`].
pub const CANONICAL_FIELDS: [&str; 8] = [
    "status", "code", "title", "detail", "id", "source", "links", "meta",
];

/// References to the part of the request that caused the error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Source {
    /// JSON Pointer (RFC 6901) into the request document, e.g. `/data/attributes/title`.
    #[serde(deserialize_with = "null_as_empty")]
    pub pointer: String,
    /// Query parameter that caused the error.
    #[serde(deserialize_with = "null_as_empty")]
    pub parameter: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Source {
    #[must_use]
    pub fn pointer(pointer: impl Into<String>) -> Self {
        Self {
            pointer: pointer.into(),
            parameter: String::new(),
        }
    }

    #[must_use]
    pub fn parameter(parameter: impl Into<String>) -> Self {
        Self {
            pointer: String::new(),
            parameter: parameter.into(),
        }
    }
}

/// Links of an error object; `about` always points at documentation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links {
    pub about: String,
    #[serde(flatten)]
    pub related: BTreeMap<String, String>,
}

/// One JSON:API error object.
///
/// Field order matches the serialized member order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorObject {
    /// HTTP status code as a decimal string.
    pub status: String,
    /// Application-specific error code, `"0"` when none was given.
    pub code: String,
    pub title: String,
    pub detail: String,
    pub id: String,
    pub source: Source,
    pub links: Links,
    pub meta: Map<String, Value>,
}
