//! Derivation of the JSON:API members from a factory error and its options

use errkit_http::HttpError;
use serde_json::Value;

use crate::config::DocsConfig;
use crate::object::{CANONICAL_FIELDS, ErrorObject, Links};
use crate::options::InvocationOptions;

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Compute the error object for `err`.
///
/// Each member takes the explicit option first, then what the payload
/// already holds, then a computed default. For status codes of 500 and
/// above `detail` falls back to the reason phrase and never to the
/// internal message.
///
/// Payload members named like error-object members are removed, so the
/// derived object is the only source of those names in the response body.
#[must_use]
pub fn derive(err: &mut HttpError, options: InvocationOptions, docs: &DocsConfig) -> ErrorObject {
    let payload = err.payload_mut();

    let existing_id = payload
        .members
        .get("id")
        .and_then(Value::as_str)
        .map(str::to_owned);
    for name in CANONICAL_FIELDS {
        payload.members.remove(name);
    }

    let id = non_empty(options.id)
        .or_else(|| non_empty(existing_id))
        .unwrap_or_default();

    let status = payload.status_code.to_string();

    let title = non_empty(options.title).unwrap_or_else(|| payload.error.clone());

    let detail = if payload.status_code < 500 {
        non_empty(options.detail)
            .or_else(|| non_empty(payload.message.clone()))
            .unwrap_or_else(|| payload.error.clone())
    } else {
        non_empty(options.detail).unwrap_or_else(|| payload.error.clone())
    };

    let code = non_empty(options.code).unwrap_or_else(|| "0".to_owned());

    let source = options.source.unwrap_or_default();

    let link_options = options.links.unwrap_or_default();
    let links = Links {
        about: non_empty(link_options.about).unwrap_or_else(|| docs.about(&code)),
        related: link_options.related,
    };

    let meta = options.meta.unwrap_or_default();

    ErrorObject {
        status,
        code,
        title,
        detail,
        id,
        source,
        links,
        meta,
    }
}
