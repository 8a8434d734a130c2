//! Centralized error handling for partition_stats
//!
//! Only resource acquisition and the external I/O collaborators can fail.
//! Numeric degeneracies (NaN, infinities) are ordinary values and never
//! surface here.

use crate::statistics::Statistic;
use std::fmt;
use std::path::PathBuf;

/// Main error type for partition_stats operations
#[derive(Debug)]
pub enum StatsError {
    /// The dataset source could not be opened or read
    InputUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The dataset source did not hold exactly the expected well-formed integers
    MalformedInput { message: String },

    /// A thread pool or other execution resource could not be acquired
    AllocationFailure { message: String },

    /// A statistic task died before producing its value
    TaskFailed {
        partition: usize,
        statistic: Statistic,
        message: String,
    },

    /// The computation as a whole did not run to completion
    Aborted { message: String },

    /// I/O errors while emitting results
    IoError(std::io::Error),

    /// JSON report serialization errors
    JsonError(serde_json::Error),
}

impl fmt::Display for StatsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatsError::InputUnavailable { path, source } => {
                write!(f, "Input unavailable: '{}': {}", path.display(), source)
            }
            StatsError::MalformedInput { message } => write!(f, "Malformed input: {}", message),
            StatsError::AllocationFailure { message } => {
                write!(f, "Allocation failure: {}", message)
            }
            StatsError::TaskFailed {
                partition,
                statistic,
                message,
            } => write!(
                f,
                "Task '{}' for partition {} failed: {}",
                statistic.as_str(),
                partition,
                message
            ),
            StatsError::Aborted { message } => write!(f, "Computation aborted: {}", message),
            StatsError::IoError(e) => write!(f, "I/O error: {}", e),
            StatsError::JsonError(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for StatsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StatsError::InputUnavailable { source, .. } => Some(source),
            StatsError::IoError(e) => Some(e),
            StatsError::JsonError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StatsError {
    fn from(error: std::io::Error) -> Self {
        StatsError::IoError(error)
    }
}

impl From<serde_json::Error> for StatsError {
    fn from(error: serde_json::Error) -> Self {
        StatsError::JsonError(error)
    }
}

impl StatsError {
    /// Shorthand for a [`StatsError::MalformedInput`]
    pub fn malformed(message: impl Into<String>) -> Self {
        StatsError::MalformedInput {
            message: message.into(),
        }
    }
}

/// Result type alias for partition_stats operations
pub type Result<T> = std::result::Result<T, StatsError>;
