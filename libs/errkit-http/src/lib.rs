//! HTTP error factory
//!
//! This crate builds [`HttpError`] values: an HTTP status code, its reason
//! phrase, an optional human message, response headers and an arbitrary data
//! attachment. It has no dependencies on HTTP frameworks. It includes:
//! - one constructor per status family (`bad_request`, `not_found`, `internal`, ...)
//! - generic `create` and `wrap`
//! - `unauthorized` with `WWW-Authenticate` challenge support
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod challenge;
pub mod error;
pub mod factory;
pub mod http_error;
pub mod status;

pub use challenge::Challenge;
pub use error::FactoryError;
pub use factory::*;
pub use http_error::{BoxError, ErrorData, HttpError, Output, Payload, INTERNAL_MESSAGE};
pub use status::{StatusArg, reason_phrase};
