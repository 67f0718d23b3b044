//! axum integration: `bind_errors` middleware and the [`ErrorResponder`] extractor
//!
//! ```ignore
//! let app = Router::new()
//!     .route("/books/{id}", get(get_book))
//!     .layer(middleware::from_fn_with_state(JsonApiErrors::default(), bind_errors));
//!
//! async fn get_book(errors: ErrorResponder) -> Result<Response, DispatchError> {
//!     errors.not_found(args!["no such book"])
//! }
//! ```
//!
//! Bound methods return the [`DispatchError`] of a rejected argument list to
//! the handler. Returning it from the handler answers with a logged `internal`
//! error.

use axum::Json;
use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::request::Parts;
use axum::http::{HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::args::Arg;
use crate::dispatch::{JsonApiError, JsonApiErrors};
use crate::document::{APPLICATION_VND_API_JSON, Document};
use crate::error::DispatchError;
use crate::kind::{ErrorKind, with_error_kinds};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BinderError {
    #[error("error responder already installed on this request")]
    AlreadyInstalled,

    #[error("error responder not installed; add the `bind_errors` middleware")]
    NotInstalled,
}

/// Answered with an `internal` error built by an unconfigured table: no
/// [`JsonApiErrors`] is reachable without the middleware, so `links.about`
/// is `/0`.
impl IntoResponse for BinderError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "error binder misconfigured");
        JsonApiErrors::default()
            .internal_cause(Box::new(self))
            .into_response()
    }
}

/// Answered with an `internal` error built by an unconfigured table
/// (`links.about` is `/0`); the rejected arguments are only logged.
impl IntoResponse for DispatchError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "failed to build error response");
        JsonApiErrors::default()
            .internal_cause(Box::new(self))
            .into_response()
    }
}

/// Per-request handle that turns constructor arguments into responses.
#[derive(Debug, Clone)]
pub struct ErrorResponder {
    errors: JsonApiErrors,
}

macro_rules! responder_methods {
    ($($(#[$attr:meta])* $method:ident => $variant:ident),+ $(,)?) => {
        impl ErrorResponder {
            $(
                #[doc = concat!("Respond with a `", stringify!($variant), "` error.")]
                ///
                $(#[$attr])*
                ///
                /// # Errors
                /// See [`ErrorResponder::send`].
                pub fn $method(&self, args: Vec<Arg>) -> Result<Response, DispatchError> {
                    self.send(ErrorKind::$variant, args)
                }
            )+
        }
    };
}

with_error_kinds!(responder_methods);

impl ErrorResponder {
    #[must_use]
    pub fn new(errors: JsonApiErrors) -> Self {
        Self { errors }
    }

    #[must_use]
    pub fn errors(&self) -> &JsonApiErrors {
        &self.errors
    }

    /// Build the `kind` error from `args` and turn it into a response.
    ///
    /// # Errors
    /// Returns the [`DispatchError`] of [`JsonApiErrors::build`] unchanged when
    /// the constructor rejects `args`.
    pub fn send(&self, kind: ErrorKind, args: Vec<Arg>) -> Result<Response, DispatchError> {
        self.errors
            .build(kind, args)
            .map(IntoResponse::into_response)
    }
}

impl<S> FromRequestParts<S> for ErrorResponder
where
    S: Send + Sync,
{
    type Rejection = BinderError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<ErrorResponder>()
            .cloned()
            .ok_or(BinderError::NotInstalled)
    }
}

/// Middleware installing an [`ErrorResponder`] into the request extensions.
///
/// Use with `axum::middleware::from_fn_with_state`.
///
/// # Panics
/// Panics when the request already carries a responder, i.e. the middleware
/// was layered twice.
pub async fn bind_errors(
    State(errors): State<JsonApiErrors>,
    mut request: Request,
    next: Next,
) -> Response {
    if request.extensions().get::<ErrorResponder>().is_some() {
        let err = BinderError::AlreadyInstalled;
        tracing::error!(error = %err, path = %request.uri().path(), "error binder installed twice");
        panic!("{err}");
    }
    request.extensions_mut().insert(ErrorResponder::new(errors));
    next.run(request).await
}

fn status_of(err: &JsonApiError) -> StatusCode {
    StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let status = status_of(&self);
        let mut response = (status, Json(&self)).into_response();
        response.headers_mut().extend(self.headers().clone());
        response
    }
}

impl IntoResponse for Document {
    fn into_response(self) -> Response {
        let status = self.errors[0]
            .status
            .parse::<u16>()
            .ok()
            .and_then(|code| StatusCode::from_u16(code).ok())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, Json(self)).into_response();
        response.headers_mut().insert(
            CONTENT_TYPE,
            HeaderValue::from_static(APPLICATION_VND_API_JSON),
        );
        response
    }
}
