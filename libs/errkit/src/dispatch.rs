//! Constructor table: classify, build through the factory, derive

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;
use errkit_http::{BoxError, ErrorData, HttpError, Payload};
use http::HeaderMap;
use serde::{Serialize, Serializer};

use crate::args::Arg;
use crate::config::{DocsConfig, ErrorsConfig};
use crate::error::{ArgumentError, DispatchError};
use crate::fields;
use crate::invocation::{GenericCall, Invocation, WrapTarget};
use crate::kind::{Convention, ErrorKind, with_error_kinds};
use crate::object::ErrorObject;
use crate::options::InvocationOptions;

/// An [`HttpError`] carrying its derived JSON:API members.
///
/// Serializes as the factory payload (`statusCode`, `error`, `message`, ...)
/// followed by the eight error-object members.
#[derive(Debug)]
pub struct JsonApiError {
    base: HttpError,
    object: ErrorObject,
}

impl JsonApiError {
    #[must_use]
    pub fn base(&self) -> &HttpError {
        &self.base
    }

    #[must_use]
    pub fn object(&self) -> &ErrorObject {
        &self.object
    }

    pub fn object_mut(&mut self) -> &mut ErrorObject {
        &mut self.object
    }

    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.base.status_code()
    }

    /// Internal message; see [`HttpError::message`].
    #[must_use]
    pub fn message(&self) -> &str {
        self.base.message()
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        self.base.headers()
    }

    #[must_use]
    pub fn payload(&self) -> &Payload {
        self.base.payload()
    }

    #[must_use]
    pub fn into_parts(self) -> (HttpError, ErrorObject) {
        (self.base, self.object)
    }
}

impl fmt::Display for JsonApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.base, f)
    }
}

impl std::error::Error for JsonApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.base)
    }
}

impl Serialize for JsonApiError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Body<'a> {
            #[serde(flatten)]
            payload: &'a Payload,
            #[serde(flatten)]
            object: &'a ErrorObject,
        }

        Body {
            payload: self.base.payload(),
            object: &self.object,
        }
        .serialize(serializer)
    }
}

/// The error constructors.
///
/// Cheap to clone; clones share the docs configuration, so
/// [`set_docs_url`](Self::set_docs_url) on any of them is seen by all.
#[derive(Clone, Default)]
pub struct JsonApiErrors {
    docs: Arc<ArcSwap<DocsConfig>>,
}

impl fmt::Debug for JsonApiErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonApiErrors")
            .field("docs", &**self.docs.load())
            .finish()
    }
}

macro_rules! kind_methods {
    ($($(#[$attr:meta])* $method:ident => $variant:ident),+ $(,)?) => {
        impl JsonApiErrors {
            $(
                #[doc = concat!("Build a `", stringify!($variant), "` error from loose arguments.")]
                ///
                $(#[$attr])*
                ///
                /// # Errors
                /// See [`JsonApiErrors::build`].
                pub fn $method(&self, args: Vec<Arg>) -> Result<JsonApiError, DispatchError> {
                    self.build(ErrorKind::$variant, args)
                }
            )+
        }
    };
}

with_error_kinds!(kind_methods);

impl JsonApiErrors {
    #[must_use]
    pub fn new(config: ErrorsConfig) -> Self {
        Self {
            docs: Arc::new(ArcSwap::from_pointee(config.docs)),
        }
    }

    /// Replace the docs base URL. Errors built afterwards link to it.
    pub fn set_docs_url(&self, url: impl Into<String>) {
        let url = url.into();
        tracing::debug!(url = %url, "errors docs url updated");
        self.docs.store(Arc::new(DocsConfig::new(url)));
    }

    #[must_use]
    pub fn docs_url(&self) -> String {
        self.docs.load().url.clone()
    }

    /// Classify `args` for `kind` and build the error.
    ///
    /// # Errors
    /// `DispatchError::Argument` when the arguments fit none of the
    /// constructor's forms, `DispatchError::Factory` when the factory rejects
    /// them (e.g. a status code below 400).
    pub fn build(&self, kind: ErrorKind, args: Vec<Arg>) -> Result<JsonApiError, DispatchError> {
        let invocation = Invocation::classify(kind, args)?;
        self.dispatch(kind, invocation)
    }

    /// Build the error for an already classified call.
    ///
    /// # Errors
    /// Same as [`build`](Self::build); additionally fails when `invocation`
    /// is a form `kind` does not accept.
    pub fn dispatch(
        &self,
        kind: ErrorKind,
        invocation: Invocation,
    ) -> Result<JsonApiError, DispatchError> {
        let (base, options) = match (kind.convention(), invocation) {
            (
                Convention::Wrap,
                Invocation::Generic(GenericCall::Wrap {
                    target,
                    status,
                    message,
                }),
            ) => {
                let error = match unwrap_augmented(target) {
                    Ok(augmented) => {
                        tracing::debug!(
                            kind = %kind,
                            status = augmented.status_code(),
                            "error already augmented"
                        );
                        return Ok(augmented);
                    }
                    Err(error) => error,
                };
                (errkit_http::wrap(error, status, message)?, None)
            }
            (
                Convention::Create,
                Invocation::Generic(GenericCall::Create {
                    status,
                    message,
                    data,
                }),
            ) => (errkit_http::create(status, message, data)?, None),
            (Convention::Challenge(_), Invocation::Challenge { message, challenge }) => {
                (errkit_http::unauthorized(message, challenge)?, None)
            }
            (
                Convention::Challenge(factory) | Convention::Standard(factory),
                Invocation::Options(mut options),
            ) => {
                let message = options.factory_message();
                let data = options
                    .err
                    .take()
                    .map(|err| ErrorData::Cause(err.into_inner()));
                (factory(message, data), Some(options))
            }
            (
                Convention::Challenge(factory) | Convention::Standard(factory),
                Invocation::Positional { message, data },
            ) => (factory(message, data), None),
            (_, invocation) => {
                return Err(ArgumentError::Convention {
                    kind,
                    convention: convention_name(&invocation),
                }
                .into());
            }
        };

        Ok(self.augment(kind, base, options.unwrap_or_default()))
    }

    /// `internal` around `cause`; cannot fail.
    #[cfg(feature = "axum")]
    pub(crate) fn internal_cause(&self, cause: BoxError) -> JsonApiError {
        let base = errkit_http::internal(None, Some(ErrorData::Cause(cause)));
        self.augment(ErrorKind::Internal, base, InvocationOptions::default())
    }

    fn augment(
        &self,
        kind: ErrorKind,
        mut base: HttpError,
        options: InvocationOptions,
    ) -> JsonApiError {
        let docs = self.docs.load();
        let object = fields::derive(&mut base, options, &docs);
        tracing::debug!(
            kind = %kind,
            status = base.status_code(),
            code = %object.code,
            server = base.is_server(),
            "error constructed"
        );
        JsonApiError { base, object }
    }
}

fn unwrap_augmented(target: WrapTarget) -> Result<JsonApiError, BoxError> {
    match target {
        WrapTarget::Augmented(err) => Ok(*err),
        WrapTarget::Error(err) => err.downcast::<JsonApiError>().map(|err| *err),
    }
}

fn convention_name(invocation: &Invocation) -> &'static str {
    match invocation {
        Invocation::Generic(GenericCall::Wrap { .. }) => "wrap",
        Invocation::Generic(GenericCall::Create { .. }) => "create",
        Invocation::Challenge { .. } => "challenge",
        Invocation::Options(_) => "options",
        Invocation::Positional { .. } => "positional",
    }
}
