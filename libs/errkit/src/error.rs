use errkit_http::FactoryError;
use thiserror::Error;

use crate::kind::ErrorKind;

/// Argument list that matches none of a constructor's forms.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ArgumentError {
    #[error("{kind}: too many arguments (expected at most {max}, got {got})")]
    TooManyArguments {
        kind: ErrorKind,
        max: usize,
        got: usize,
    },

    #[error("{kind}: missing required argument '{name}'")]
    Missing { kind: ErrorKind, name: &'static str },

    #[error("{kind}: argument '{name}' must be {expected}, got {got}")]
    Unexpected {
        kind: ErrorKind,
        name: &'static str,
        expected: &'static str,
        got: &'static str,
    },

    #[error("{kind}: malformed options: {reason}")]
    MalformedOptions { kind: ErrorKind, reason: String },

    #[error("{kind}: {convention} arguments are not accepted")]
    Convention {
        kind: ErrorKind,
        convention: &'static str,
    },
}

/// Failure to construct an error.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The caller passed arguments the constructor does not accept
    #[error(transparent)]
    Argument(#[from] ArgumentError),

    /// The factory rejected its inputs (e.g. a non-numeric status code)
    #[error(transparent)]
    Factory(#[from] FactoryError),
}
