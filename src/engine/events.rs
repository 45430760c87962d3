//! Events emitted by the countdown engine

use serde::{Deserialize, Serialize};

/// Notification produced by a state transition of the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TimerEvent {
    /// A countdown was armed; the warning message can be shown muted until it fires
    Started {
        total_seconds: u64,
        warning_threshold_seconds: u64,
        warning_message: String,
    },
    /// New `HH:MM:SS` text for the display
    Display { text: String },
    /// Remaining time dropped to or below the warning threshold
    WarningRaised { message: String },
    /// Warning styling should be removed
    WarningCleared,
    /// Time is up
    CountdownComplete,
}

impl TimerEvent {
    /// Short name of the event, used as the SSE event type
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Started { .. } => "started",
            Self::Display { .. } => "display",
            Self::WarningRaised { .. } => "warning_raised",
            Self::WarningCleared => "warning_cleared",
            Self::CountdownComplete => "countdown_complete",
        }
    }
}

/// Receiver of engine events (display, warning and completion sinks)
pub trait TimerSink {
    fn emit(&mut self, event: TimerEvent);
}

impl TimerSink for Vec<TimerEvent> {
    fn emit(&mut self, event: TimerEvent) {
        self.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_event_tag() {
        let json = serde_json::to_value(TimerEvent::WarningRaised {
            message: "Hurry".to_string(),
        })
        .unwrap();
        assert_eq!(json["event"], "warning_raised");
        assert_eq!(json["message"], "Hurry");

        let json = serde_json::to_value(TimerEvent::CountdownComplete).unwrap();
        assert_eq!(json["event"], "countdown_complete");
    }

    #[test]
    fn kind_matches_serde_tag() {
        let event = TimerEvent::Display { text: "00:00:01".to_string() };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], event.kind());
    }
}
