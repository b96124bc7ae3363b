//! Error types for the trainer core.
//!
//! Guessing after a session has completed is not an error: the controller
//! ignores it. Everything here is either a storage failure or a bad setting.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the store, the controller, or settings validation.
#[derive(Debug, Error)]
pub enum TrainerError {
    /// Reading or writing the storage medium failed.
    #[error("storage I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A stored record exists but does not parse.
    #[error("stored state under key `{key}` is malformed: {source}")]
    CorruptState {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The in-memory state could not be serialized.
    #[error("failed to encode state: {0}")]
    Encode(#[from] serde_json::Error),

    /// Blue bias must be a probability.
    #[error("blue bias must be within [0, 1], got {0}")]
    InvalidBias(f64),
}

impl TrainerError {
    /// Returns `true` if the failure came from unreadable stored data rather
    /// than the storage medium itself.
    pub fn is_corrupt_state(&self) -> bool {
        matches!(self, TrainerError::CorruptState { .. })
    }
}

pub type Result<T> = std::result::Result<T, TrainerError>;
