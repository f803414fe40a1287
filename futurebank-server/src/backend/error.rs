//! Error types for backend access

use thiserror::Error;

use crate::backend::query::Table;

/// Result type alias for backend operations
pub type Result<T> = std::result::Result<T, BackendError>;

/// Postgres error code for unique constraint violations
pub const UNIQUE_VIOLATION: &str = "23505";

/// Errors reported by the hosted backend or while talking to it
#[derive(Debug, Error)]
pub enum BackendError {
    /// The request never produced a response
    #[error("backend request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with an error
    #[error("{message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// A write collided with an existing row
    #[error("duplicate row in {table}: {message}")]
    Conflict { table: String, message: String },

    /// Missing, expired or rejected access token
    #[error("not authorized: {0}")]
    Unauthorized(String),

    /// The response did not have the expected shape
    #[error("unexpected backend response: {0}")]
    Decode(String),

    #[error("query on {0} returned more than one row")]
    MultipleRows(Table),

    #[error("{0} is not supported by this backend")]
    Unsupported(String),
}

impl BackendError {
    pub fn api(status: u16, code: Option<String>, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            code,
            message: message.into(),
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}

impl From<serde_json::Error> for BackendError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
