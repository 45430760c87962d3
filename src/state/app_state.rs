//! Main application state management

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::info;

use super::EventBroadcaster;
use crate::{
    engine::{StartOutcome, TimerEngine, TimerEvent, TimerSnapshot, ValidationError},
    input::StartInputs,
    tasks::TokioTicker,
};

/// Interval between countdown ticks
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Buffered events per subscriber before it starts lagging
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// The engine as wired up in the running service
pub type LiveEngine = TimerEngine<EventBroadcaster, TokioTicker>;

/// Errors from a control action on the shared state
#[derive(Debug, Error)]
pub enum ControlError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    StateUnavailable(String),
}

/// Main application state that owns the countdown engine
#[derive(Debug)]
pub struct AppState {
    /// The single countdown of this process
    pub engine: Mutex<LiveEngine>,
    /// Channel every engine event is published on
    pub event_tx: broadcast::Sender<TimerEvent>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Mutex<Option<String>>,
    pub last_action_time: Mutex<Option<DateTime<Utc>>>,
}

impl AppState {
    /// Create the shared state with an idle engine.
    ///
    /// The ticker holds a weak handle back to this state so its task can
    /// reach the engine without keeping the state alive.
    pub fn new(port: u16, host: String) -> Arc<Self> {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Arc::new_cyclic(|weak| {
            let sink = EventBroadcaster::new(event_tx.clone());
            let ticker = TokioTicker::new(weak.clone(), TICK_PERIOD);

            Self {
                engine: Mutex::new(TimerEngine::new(sink, ticker)),
                event_tx,
                start_time: Instant::now(),
                port,
                host,
                last_action: Mutex::new(None),
                last_action_time: Mutex::new(None),
            }
        })
    }

    /// Lock the engine for a synchronous mutation
    pub fn lock_engine(&self) -> Result<MutexGuard<'_, LiveEngine>, ControlError> {
        self.engine
            .lock()
            .map_err(|e| ControlError::StateUnavailable(format!("Failed to lock timer engine: {}", e)))
    }

    /// Start a countdown; a no-op if one is already running
    pub fn start_countdown(
        &self,
        inputs: &StartInputs,
    ) -> Result<(StartOutcome, TimerSnapshot), ControlError> {
        let mut engine = self.lock_engine()?;
        let outcome = engine.start(inputs.hours, inputs.warning_minutes, &inputs.message)?;
        let snapshot = engine.snapshot();
        drop(engine); // Release the lock early

        if outcome == StartOutcome::Started {
            self.record_action("start");
        }

        Ok((outcome, snapshot))
    }

    /// Stop any countdown and return to idle
    pub fn reset_countdown(&self) -> Result<TimerSnapshot, ControlError> {
        let mut engine = self.lock_engine()?;
        engine.reset();
        let snapshot = engine.snapshot();
        drop(engine);

        self.record_action("reset");
        Ok(snapshot)
    }

    /// Get current countdown state
    pub fn snapshot(&self) -> Result<TimerSnapshot, ControlError> {
        Ok(self.lock_engine()?.snapshot())
    }

    /// Subscribe to engine events from now on
    pub fn subscribe(&self) -> broadcast::Receiver<TimerEvent> {
        self.event_tx.subscribe()
    }

    fn record_action(&self, action: &str) {
        info!("Control action: {}", action);
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
