//! Error types for the query crate.

use thiserror::Error;

/// Errors that can occur when building or executing queries.
#[derive(Debug, Error)]
pub enum QueryError {
    /// A `LIKE` pattern could not be compiled.
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// A clause or ordering referenced a field the data source does not have.
    #[error("unknown field '{0}'")]
    UnknownField(String),

    /// A sort direction string was neither `asc` nor `desc`.
    #[error("invalid sort direction '{0}', expected asc or desc")]
    InvalidDirection(String),

    /// Failure inside a backing store.
    #[error("data source error: {0}")]
    Source(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl QueryError {
    /// Wraps a backend-specific error.
    pub fn source_error(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        QueryError::Source(Box::new(err))
    }
}

/// Result type for query operations.
pub type Result<T> = std::result::Result<T, QueryError>;
