//! Validation and rounding of start inputs

use super::ValidationError;

/// Message used when the caller leaves the warning text empty
pub const DEFAULT_WARNING_MESSAGE: &str = "Time is running out!";

/// A validated countdown, expressed in whole seconds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownPlan {
    pub total_seconds: u64,
    pub warning_threshold_seconds: u64,
    pub warning_message: String,
}

impl CountdownPlan {
    /// Validate raw inputs and round them to the nearest whole second.
    ///
    /// Non-finite inputs count as 0. The threshold comparison is made on the
    /// rounded values, so the resulting plan always satisfies
    /// `warning_threshold_seconds < total_seconds`. Near one second this is
    /// stricter than comparing raw inputs: 1/3600h with 0.009min (0.54s) is
    /// rejected as 1s >= 1s.
    pub fn new(hours: f64, warning_minutes: f64, message: &str) -> Result<Self, ValidationError> {
        let hours = finite_or_zero(hours);
        let warning_minutes = finite_or_zero(warning_minutes);

        if hours <= 0.0 {
            return Err(ValidationError::NonPositiveDuration);
        }
        if warning_minutes <= 0.0 {
            return Err(ValidationError::NonPositiveThreshold);
        }

        let total_seconds = whole_seconds(hours * 3600.0);
        let warning_threshold_seconds = whole_seconds(warning_minutes * 60.0);

        if warning_threshold_seconds >= total_seconds {
            return Err(ValidationError::ThresholdExceedsDuration {
                threshold_seconds: warning_threshold_seconds,
                total_seconds,
            });
        }

        Ok(Self {
            total_seconds,
            warning_threshold_seconds,
            warning_message: effective_message(message).to_string(),
        })
    }
}

/// Fall back to the default warning text for an empty message
pub fn effective_message(message: &str) -> &str {
    if message.is_empty() {
        DEFAULT_WARNING_MESSAGE
    } else {
        message
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

// `as` saturates, which caps absurdly long durations at u64::MAX.
fn whole_seconds(seconds: f64) -> u64 {
    seconds.round() as u64
}
