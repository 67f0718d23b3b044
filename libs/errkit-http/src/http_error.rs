//! `HttpError`: status, reason phrase, message, headers and data in one value

use std::fmt;

use http::HeaderMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::status::reason_phrase;

/// Boxed error accepted as a cause.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Message exposed in the payload of every 500 response.
pub const INTERNAL_MESSAGE: &str = "An internal server error occurred";

/// Second argument of the family constructors.
#[derive(Debug)]
pub enum ErrorData {
    /// Arbitrary JSON attached to the error
    Value(Value),
    /// Underlying error that caused this one
    Cause(BoxError),
}

impl From<Value> for ErrorData {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<BoxError> for ErrorData {
    fn from(cause: BoxError) -> Self {
        Self::Cause(cause)
    }
}

/// Response body members of an [`HttpError`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payload {
    pub status_code: u16,
    /// Reason phrase of `status_code`, or `Unknown`
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Challenge attributes of an `unauthorized` error
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Map<String, Value>>,
    /// Any other members placed on the payload
    #[serde(flatten)]
    pub members: Map<String, Value>,
}

/// What gets sent to the client.
#[derive(Debug, Clone)]
pub struct Output {
    pub status_code: u16,
    pub headers: HeaderMap,
    pub payload: Payload,
}

/// An HTTP error built by the factory.
#[derive(Debug)]
pub struct HttpError {
    message: String,
    data: Option<Value>,
    source: Option<BoxError>,
    is_server: bool,
    is_developer_error: bool,
    is_missing: bool,
    output: Output,
}

impl HttpError {
    /// Build an error for `status_code`.
    ///
    /// `own_message` is the message the error carries on its own (the
    /// caller's message for `create`, the cause's text for `wrap`). It is
    /// what the payload exposes. `prefix` is prepended to the internal
    /// message only.
    pub(crate) fn initialize(status_code: u16, own_message: String, prefix: Option<&str>) -> Self {
        let reason = reason_phrase(status_code);

        let payload_message = if status_code == 500 {
            Some(INTERNAL_MESSAGE.to_owned())
        } else if own_message.is_empty() {
            None
        } else {
            Some(own_message.clone())
        };

        let message = match prefix.filter(|p| !p.is_empty()) {
            Some(prefix) if own_message.is_empty() => prefix.to_owned(),
            Some(prefix) => format!("{prefix}: {own_message}"),
            None if own_message.is_empty() => reason.to_owned(),
            None => own_message,
        };

        Self {
            message,
            data: None,
            source: None,
            is_server: status_code >= 500,
            is_developer_error: false,
            is_missing: false,
            output: Output {
                status_code,
                headers: HeaderMap::new(),
                payload: Payload {
                    status_code,
                    error: reason.to_owned(),
                    message: payload_message,
                    attributes: None,
                    members: Map::new(),
                },
            },
        }
    }

    pub(crate) fn attach(mut self, data: Option<ErrorData>) -> Self {
        match data {
            Some(ErrorData::Value(Value::Null)) | None => {}
            Some(ErrorData::Value(value)) => self.data = Some(value),
            Some(ErrorData::Cause(cause)) => self.source = Some(cause),
        }
        self
    }

    pub(crate) fn with_cause(mut self, cause: BoxError) -> Self {
        self.source = Some(cause);
        self
    }

    pub(crate) fn set_developer_error(&mut self) {
        self.is_developer_error = true;
    }

    pub(crate) fn set_missing(&mut self) {
        self.is_missing = true;
    }

    /// Internal message, never shown to clients of server errors.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.output.status_code
    }

    #[must_use]
    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    /// Wrapped cause, if any.
    #[must_use]
    pub fn cause(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.source.as_deref()
    }

    /// `true` for status codes of 500 and above.
    #[must_use]
    pub fn is_server(&self) -> bool {
        self.is_server
    }

    /// Set by `bad_implementation`.
    #[must_use]
    pub fn is_developer_error(&self) -> bool {
        self.is_developer_error
    }

    /// Set by `unauthorized` when a scheme was given without an error message.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        self.is_missing
    }

    #[must_use]
    pub fn output(&self) -> &Output {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut Output {
        &mut self.output
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.output.headers
    }

    #[must_use]
    pub fn payload(&self) -> &Payload {
        &self.output.payload
    }

    pub fn payload_mut(&mut self) -> &mut Payload {
        &mut self.output.payload
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for HttpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|cause| cause as &(dyn std::error::Error + 'static))
    }
}
