//! State management module
//! 
//! This module holds the shared application state that owns the live
//! countdown engine, and the sink that publishes its events.

pub mod app_state;
pub mod event_sink;

// Re-export main types
pub use app_state::{AppState, ControlError, LiveEngine};
pub use event_sink::EventBroadcaster;
