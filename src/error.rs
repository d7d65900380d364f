//! Unified error hierarchy for streakrs
//!
//! The computation engine itself is total over well-typed data and has no
//! failure modes; errors only arise at the storage, config, and CLI
//! boundaries.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for all streakrs operations
#[derive(Debug, Error)]
pub enum StreakrsError {
    /// Local store errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid user input caught at the boundary
    #[error("Validation error: {0}")]
    Validation(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Local data-store errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// No activity with the given id
    #[error("Activity not found: {id}")]
    ActivityNotFound { id: String },

    /// Data file exists but cannot be parsed
    #[error("Corrupted data file {path}: {reason}")]
    Corrupted { path: PathBuf, reason: String },

    /// Data directory could not be resolved
    #[error("No usable data directory: {reason}")]
    NoDataDir { reason: String },
}

/// Result type alias for streakrs operations
pub type Result<T> = std::result::Result<T, StreakrsError>;

impl StreakrsError {
    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            StreakrsError::Storage(StorageError::ActivityNotFound { id }) => {
                format!("No activity with id {id}. Run `streakrs list` to see ids.")
            }
            StreakrsError::Storage(StorageError::Corrupted { path, .. }) => {
                format!(
                    "Your data file at {} could not be read. Restore it from a backup or remove it to start fresh.",
                    path.display()
                )
            }
            StreakrsError::Validation(reason) => format!("Invalid input: {reason}"),
            _ => self.to_string(),
        }
    }
}
