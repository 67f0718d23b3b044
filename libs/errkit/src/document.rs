//! Single-error JSON:API document

use serde::{Deserialize, Serialize};

use crate::dispatch::JsonApiError;
use crate::object::ErrorObject;

/// Media type of JSON:API documents.
pub const APPLICATION_VND_API_JSON: &str = "application/vnd.api+json";

/// `{ "errors": [ ... ] }` with exactly one error object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub errors: [ErrorObject; 1],
}

impl From<&JsonApiError> for Document {
    fn from(err: &JsonApiError) -> Self {
        Self {
            errors: [err.object().clone()],
        }
    }
}

impl From<JsonApiError> for Document {
    fn from(err: JsonApiError) -> Self {
        let (_, object) = err.into_parts();
        Self { errors: [object] }
    }
}

/// Copy the error-object members of `err` into a document.
#[must_use]
pub fn serialize(err: &JsonApiError) -> Document {
    Document::from(err)
}
