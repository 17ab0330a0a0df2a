//! Engine error taxonomy.

use thiserror::Error;

use crate::db::repository::RepositoryError;

/// Result type for engine operations.
pub type EngineResult<T> = std::result::Result<T, EngineError>;

/// Errors surfaced by a prediction run.
///
/// Sparse or empty sighting history is never an error; the computation steps
/// model "no data yet" as valid degenerate results.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Profile or property does not exist. Surfaced unchanged, not retried.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The property's day/night hours cannot form a valid day-part partition,
    /// or the tuning configuration is out of range. Not retried; this is a
    /// data-quality issue upstream.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Transient failure reaching the storage collaborator. The caller may
    /// retry with backoff; the engine itself never retries internally.
    #[error("Data load failed: {0}")]
    DataLoad(String),

    /// The caller's cancellation signal fired before the history load
    /// completed. The whole run is aborted; no partial result exists.
    #[error("Prediction run cancelled")]
    Cancelled,
}

impl From<RepositoryError> for EngineError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(msg) => EngineError::NotFound(msg),
            RepositoryError::ConfigurationError(msg) => EngineError::InvalidConfiguration(msg),
            other => EngineError::DataLoad(other.to_string()),
        }
    }
}
