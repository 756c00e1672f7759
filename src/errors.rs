use std::result::Result as StdResult;

use thiserror::Error;

/// Error type for projection inputs, configuration, and snapshot storage.
///
/// Business outcomes such as a negative safe-spending limit or a reserve breach are
/// never represented here; they are part of the projection result.
#[derive(Debug, Error)]
pub enum ProjectionError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Persistence error: {0}")]
    StorageError(String),
}

pub type Result<T> = StdResult<T, ProjectionError>;

impl From<std::io::Error> for ProjectionError {
    fn from(err: std::io::Error) -> Self {
        ProjectionError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for ProjectionError {
    fn from(err: serde_json::Error) -> Self {
        ProjectionError::StorageError(err.to_string())
    }
}
