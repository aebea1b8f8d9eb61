//! Query-layer error types.

use thiserror::Error;

/// Errors raised while expanding a payload into backend values.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("no decoder registered for path: {0}")]
    UnknownPath(String),

    #[error("failed to decode value at {path}: {reason}")]
    Decode { path: String, reason: String },
}

/// Result type alias for query operations.
pub type QueryResult<T> = std::result::Result<T, QueryError>;
