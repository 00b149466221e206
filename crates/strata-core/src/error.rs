//! Centralized error types for Strata.

use thiserror::Error;

/// Main error type for Strata operations.
#[derive(Error, Debug)]
pub enum StrataError {
    #[error("Factor not found in {matrix} matrix: {id}")]
    FactorNotFound { matrix: String, id: String },

    #[error("SWOT item not found in {bucket}: {id}")]
    SwotItemNotFound { bucket: String, id: String },

    #[error("Key success factor not found: {0}")]
    KsfNotFound(String),

    #[error("Competitor not found: {0}")]
    CompetitorNotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    Database(#[from] strata_db::DbError),

    #[error("Remote store error: {0}")]
    Remote(#[from] strata_redis::RedisError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for Strata operations.
pub type StrataResult<T> = Result<T, StrataError>;

impl StrataError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
