//! Start-input validation errors

use thiserror::Error;

/// Reasons a countdown refuses to start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a valid number of hours greater than 0")]
    NonPositiveDuration,
    #[error("Please enter a valid warning threshold greater than 0")]
    NonPositiveThreshold,
    #[error("Warning threshold must be less than the total countdown time ({threshold_seconds}s >= {total_seconds}s)")]
    ThresholdExceedsDuration {
        threshold_seconds: u64,
        total_seconds: u64,
    },
}
