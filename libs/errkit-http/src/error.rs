use thiserror::Error;

/// Errors raised by the factory when its inputs cannot describe an HTTP error.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum FactoryError {
    /// Status code is not a number, not finite, or below 400
    #[error("First argument must be a number (400+): {value}")]
    InvalidStatus { value: String },

    /// Status code is numeric but does not fit an HTTP status
    #[error("Status code out of range: {value}")]
    StatusOutOfRange { value: String },

    /// Challenge attribute contains characters that cannot appear in a header
    #[error("Bad attribute value: {value}")]
    InvalidHeaderAttribute { value: String },

    /// Assembled header value was rejected
    #[error("Invalid header value: {0}")]
    InvalidHeaderValue(#[from] http::header::InvalidHeaderValue),
}
