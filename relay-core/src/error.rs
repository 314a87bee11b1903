//! Error types for the relay builders.

use thiserror::Error;

/// Errors that can occur while building links.
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Invalid {field} URL: {source}")]
    InvalidUrl {
        field: &'static str,
        source: url::ParseError,
    },
}

/// Result type alias for relay operations.
pub type RelayResult<T> = Result<T, RelayError>;
