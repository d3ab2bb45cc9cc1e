//! Error types for the workout tracker

use thiserror::Error;

/// Errors that can occur while building or reporting a workout
#[derive(Debug, Error)]
pub enum WorkoutError {
    #[error("Unknown activity code: {0}")]
    UnknownActivity(String),

    #[error("Invalid reading at position {index} ({field}): {reason}")]
    InvalidReading {
        index: usize,
        field: &'static str,
        reason: String,
    },

    #[error("Activity {code} expects {expected} readings, got {actual}")]
    Arity {
        code: String,
        expected: usize,
        actual: usize,
    },

    #[error("Computed {field} is out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },

    #[error("Failed to parse batch: {0}")]
    ParseError(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to emit report: {0}")]
    Io(#[from] std::io::Error),
}

impl WorkoutError {
    /// True for errors caused by the package contents (code, arity, readings,
    /// or readings too extreme to report)
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            WorkoutError::UnknownActivity(_)
                | WorkoutError::InvalidReading { .. }
                | WorkoutError::Arity { .. }
                | WorkoutError::OutOfRange { .. }
        )
    }
}
