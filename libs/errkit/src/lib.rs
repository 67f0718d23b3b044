//! Canonical HTTP errors rendered as JSON:API error objects
//!
//! Every error constructor accepts one of four argument shapes (see
//! [`Invocation`]), builds an [`errkit_http::HttpError`] and derives the
//! JSON:API member set (`id`, `status`, `code`, `title`, `detail`, `source`,
//! `links`, `meta`) onto it. It includes:
//! - [`JsonApiErrors`]: the constructor table, holding the docs URL used for `links.about`
//! - [`Document`]: the single-error `{ "errors": [...] }` document
//! - an axum binder (`axum` feature): middleware plus a per-request [`ErrorResponder`]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod args;
pub mod config;
pub mod dispatch;
pub mod document;
pub mod error;
pub mod fields;
pub mod invocation;
pub mod kind;
pub mod object;
pub mod options;

#[cfg(feature = "axum")]
pub mod binder;

pub use args::Arg;
pub use config::{DocsConfig, ErrorsConfig};
pub use dispatch::{JsonApiError, JsonApiErrors};
pub use document::{APPLICATION_VND_API_JSON, Document, serialize};
pub use error::{ArgumentError, DispatchError};
pub use invocation::{GenericCall, Invocation, WrapTarget};
pub use kind::{Convention, ErrorKind, KIND_TABLE, KindSpec, UnknownKind};
pub use object::{ErrorObject, Links, Source};
pub use options::{InvocationOptions, LinkOptions, OriginalError};

#[cfg(feature = "axum")]
pub use binder::{BinderError, ErrorResponder, bind_errors};
