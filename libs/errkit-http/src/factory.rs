//! Constructors, one per status family, plus `create`, `wrap` and `unauthorized`

use http::HeaderValue;
use http::header::WWW_AUTHENTICATE;

use crate::challenge::{self, Challenge};
use crate::error::FactoryError;
use crate::http_error::{BoxError, ErrorData, HttpError};
use crate::status::StatusArg;

/// Build an error for an arbitrary status code.
///
/// Unrecognized codes of 400 and above are accepted with the `Unknown`
/// reason phrase.
///
/// # Errors
/// Returns `FactoryError` when `status` is not a number of at least 400.
pub fn create(
    status: impl Into<StatusArg>,
    message: Option<String>,
    data: Option<ErrorData>,
) -> Result<HttpError, FactoryError> {
    let status_code = status.into().resolve()?;
    Ok(HttpError::initialize(status_code, message.unwrap_or_default(), None).attach(data))
}

/// Turn any error into an [`HttpError`].
///
/// An error that already is an `HttpError` is returned unchanged and the
/// other arguments are ignored. Anything else gets `status` (default 500)
/// and keeps its own text; `message`, when given, is prepended to it.
///
/// # Errors
/// Returns `FactoryError` when `status` is not a number of at least 400.
pub fn wrap(
    error: BoxError,
    status: Option<StatusArg>,
    message: Option<String>,
) -> Result<HttpError, FactoryError> {
    let cause = match error.downcast::<HttpError>() {
        Ok(existing) => return Ok(*existing),
        Err(cause) => cause,
    };
    let status_code = status.as_ref().map_or(Ok(500), StatusArg::resolve)?;
    let own_message = cause.to_string();
    Ok(HttpError::initialize(status_code, own_message, message.as_deref()).with_cause(cause))
}

/// 401 with an optional `WWW-Authenticate` challenge.
///
/// A single scheme without a message marks the error as missing credentials
/// (`is_missing`).
///
/// # Errors
/// Returns `FactoryError` when the challenge cannot be rendered as a header.
pub fn unauthorized(
    message: Option<String>,
    challenge: Option<Challenge>,
) -> Result<HttpError, FactoryError> {
    let message = message.unwrap_or_default();
    let mut err = HttpError::initialize(401, message.clone(), None);
    let Some(challenge) = challenge else {
        return Ok(err);
    };

    let rendered = challenge::render(challenge, &message)?;
    if rendered.missing {
        err.set_missing();
    }
    if rendered.attributes.is_some() {
        err.payload_mut().attributes = rendered.attributes;
    }
    err.output_mut()
        .headers
        .insert(WWW_AUTHENTICATE, HeaderValue::from_str(&rendered.header)?);
    Ok(err)
}

/// 401 without a challenge, carrying `data` like the other client families.
#[must_use]
pub fn unauthorized_with_data(message: Option<String>, data: Option<ErrorData>) -> HttpError {
    client_error(401, message, data)
}

fn client_error(status_code: u16, message: Option<String>, data: Option<ErrorData>) -> HttpError {
    HttpError::initialize(status_code, message.unwrap_or_default(), None).attach(data)
}

/// Server families wrap a cause instead of attaching it.
fn server_error(status_code: u16, message: Option<String>, data: Option<ErrorData>) -> HttpError {
    match data {
        Some(ErrorData::Cause(cause)) => match cause.downcast::<HttpError>() {
            Ok(existing) => *existing,
            Err(cause) => {
                let own_message = cause.to_string();
                HttpError::initialize(status_code, own_message, message.as_deref())
                    .with_cause(cause)
            }
        },
        other => client_error(status_code, message, other),
    }
}

macro_rules! family_constructors {
    ($builder:ident: $($(#[$doc:meta])* $name:ident => $code:literal),+ $(,)?) => {
        $(
            $(#[$doc])*
            #[must_use]
            pub fn $name(message: Option<String>, data: Option<ErrorData>) -> HttpError {
                $builder($code, message, data)
            }
        )+
    };
}

family_constructors! { client_error:
    /// 400 Bad Request
    bad_request => 400,
    /// 402 Payment Required
    payment_required => 402,
    /// 403 Forbidden
    forbidden => 403,
    /// 404 Not Found
    not_found => 404,
    /// 405 Method Not Allowed
    method_not_allowed => 405,
    /// 406 Not Acceptable
    not_acceptable => 406,
    /// 407 Proxy Authentication Required
    proxy_auth_required => 407,
    /// 408 Request Timeout
    client_timeout => 408,
    /// 409 Conflict
    conflict => 409,
    /// 410 Gone
    resource_gone => 410,
    /// 411 Length Required
    length_required => 411,
    /// 412 Precondition Failed
    precondition_failed => 412,
    /// 413 Payload Too Large
    entity_too_large => 413,
    /// 414 URI Too Long
    uri_too_long => 414,
    /// 415 Unsupported Media Type
    unsupported_media_type => 415,
    /// 416 Range Not Satisfiable
    range_not_satisfiable => 416,
    /// 417 Expectation Failed
    expectation_failed => 417,
    /// 418 I'm a teapot
    teapot => 418,
    /// 422 Unprocessable Entity
    bad_data => 422,
    /// 423 Locked
    locked => 423,
    /// 428 Precondition Required
    precondition_required => 428,
    /// 429 Too Many Requests
    too_many_requests => 429,
    /// 451 Unavailable For Legal Reasons
    illegal => 451,
}

family_constructors! { server_error:
    /// 500 Internal Server Error
    internal => 500,
    /// 501 Not Implemented
    not_implemented => 501,
    /// 502 Bad Gateway
    bad_gateway => 502,
    /// 503 Service Unavailable
    server_unavailable => 503,
    /// 504 Gateway Timeout
    gateway_timeout => 504,
}

/// 500 flagged as a developer error.
#[must_use]
pub fn bad_implementation(message: Option<String>, data: Option<ErrorData>) -> HttpError {
    let mut err = server_error(500, message, data);
    err.set_developer_error();
    err
}
