//! Console presentation of countdown events

use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, info, warn};

use crate::engine::{format_display, TimerEvent};

/// Background task that logs every countdown event
pub async fn event_log_task(mut events: broadcast::Receiver<TimerEvent>) {
    info!("Starting event log task");

    loop {
        match events.recv().await {
            Ok(event) => log_event(&event),
            Err(RecvError::Lagged(skipped)) => {
                warn!("Event log fell behind, skipped {} events", skipped);
            }
            Err(RecvError::Closed) => {
                info!("Event channel closed, stopping event log task");
                break;
            }
        }
    }
}

fn log_event(event: &TimerEvent) {
    match event {
        TimerEvent::Started {
            total_seconds,
            warning_threshold_seconds,
            warning_message,
        } => info!(
            "Countdown of {} armed, warning at {}: {}",
            format_display(*total_seconds),
            format_display(*warning_threshold_seconds),
            warning_message
        ),
        TimerEvent::Display { text } => debug!("{}", text),
        TimerEvent::WarningRaised { message } => warn!("{}", message),
        TimerEvent::WarningCleared => debug!("Warning cleared"),
        TimerEvent::CountdownComplete => info!("Time is up!"),
    }
}
