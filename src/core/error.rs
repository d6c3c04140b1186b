//! Error taxonomy for the engine.
//!
//! Every failure is detected at a component boundary and reported as a value;
//! none of them leaves the grid half-swapped.

use thiserror::Error;

use super::RunState;

pub type LifeResult<T> = Result<T, LifeError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifeError {
    /// Zero-sized (or unaddressable) grid requested at construction.
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Coordinate outside the grid extent.
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds { x: u32, y: u32, width: u32, height: u32 },

    /// State-machine violation, e.g. editing cells while running.
    #[error("{operation} is not allowed while {state}")]
    InvalidOperation { operation: &'static str, state: RunState },

    /// A partition task failed; the advance was abandoned and nothing was swapped.
    #[error("partition {index} (rows {start}..{end}) failed: {reason}")]
    PartitionFailure { index: usize, start: u32, end: u32, reason: String },

    /// Partitioning left a gap or overlap in row coverage.
    #[error("row coverage violated: {0}")]
    CoverageViolation(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("snapshot does not fit the grid: {0}")]
    SnapshotMismatch(String),

    #[error("failed to decode: {0}")]
    Decode(String),

    /// No seed was configured and the platform entropy source failed.
    #[error("entropy source unavailable: {0}")]
    Entropy(String),
}

impl LifeError {
    /// Errors the caller can retry without changing anything.
    pub fn is_retryable(&self) -> bool {
        matches!(self, LifeError::PartitionFailure { .. })
    }
}

impl From<serde_json::Error> for LifeError {
    fn from(err: serde_json::Error) -> Self {
        LifeError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_values() {
        let err = LifeError::OutOfBounds { x: 9, y: 2, width: 4, height: 4 };
        assert_eq!(err.to_string(), "cell (9, 2) is outside the 4x4 grid");

        let err = LifeError::InvalidOperation { operation: "step", state: RunState::Running };
        assert_eq!(err.to_string(), "step is not allowed while running");
    }

    #[test]
    fn only_partition_failures_are_retryable() {
        let failure = LifeError::PartitionFailure {
            index: 1,
            start: 4,
            end: 8,
            reason: "boom".into(),
        };
        assert!(failure.is_retryable());
        assert!(!LifeError::CoverageViolation("gap".into()).is_retryable());
    }
}
