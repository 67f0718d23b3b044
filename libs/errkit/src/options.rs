//! Structured options accepted by every family constructor

use std::collections::BTreeMap;
use std::fmt;

use errkit_http::BoxError;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::object::Source;

/// Error supplied through `options.err`.
///
/// Either any Rust error, or a `{ "message": ... }` record (or plain string)
/// when the options are deserialized from JSON.
pub struct OriginalError(BoxError);

impl OriginalError {
    #[must_use]
    pub fn new(error: impl Into<BoxError>) -> Self {
        Self(error.into())
    }

    /// Text of the error, used as the message when `options.message` is absent.
    #[must_use]
    pub fn message(&self) -> String {
        self.0.to_string()
    }

    #[must_use]
    pub fn into_inner(self) -> BoxError {
        self.0
    }
}

impl fmt::Debug for OriginalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OriginalError").field(&self.0.to_string()).finish()
    }
}

/// Error reported by a client-side record such as `{ "message": "Oops!" }`.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ReportedError {
    pub message: String,
}

impl<'de> Deserialize<'de> for OriginalError {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Record {
                #[serde(default)]
                message: String,
            },
        }

        let message = match Repr::deserialize(deserializer)? {
            Repr::Text(message) | Repr::Record { message } => message,
        };
        Ok(Self::new(ReportedError { message }))
    }
}

/// `links` as given by the caller; `about` is filled in when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LinkOptions {
    pub about: Option<String>,
    #[serde(flatten)]
    pub related: BTreeMap<String, String>,
}

/// Optional overrides for the derived error object.
///
/// Every member is optional; empty strings count as absent. The options are
/// consumed by one construction: `source` and `links` are completed with their
/// defaults and moved into the resulting error object.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct InvocationOptions {
    pub err: Option<OriginalError>,
    pub message: Option<String>,
    pub id: Option<String>,
    pub code: Option<String>,
    pub title: Option<String>,
    pub detail: Option<String>,
    pub source: Option<Source>,
    pub links: Option<LinkOptions>,
    pub meta: Option<Map<String, Value>>,
}

impl InvocationOptions {
    #[must_use]
    pub fn with_err(mut self, err: impl Into<BoxError>) -> Self {
        self.err = Some(OriginalError::new(err));
        self
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: Source) -> Self {
        self.source = Some(source);
        self
    }

    #[must_use]
    pub fn with_links(mut self, links: LinkOptions) -> Self {
        self.links = Some(links);
        self
    }

    #[must_use]
    pub fn with_meta(mut self, meta: Map<String, Value>) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Message for the factory call: `message`, else the text of `err`.
    pub(crate) fn factory_message(&self) -> Option<String> {
        self.message
            .clone()
            .filter(|m| !m.is_empty())
            .or_else(|| self.err.as_ref().map(OriginalError::message))
    }
}
