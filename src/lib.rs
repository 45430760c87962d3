//! Hourglass - A countdown timer service with a one-shot warning threshold
//! 
//! This library provides the countdown engine, the shared state that hosts
//! it, and the HTTP control surface that starts, resets and observes it.

pub mod config;
pub mod engine;
pub mod input;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use engine::{TimerEngine, TimerEvent, TimerPhase, TimerSnapshot, ValidationError};
pub use input::StartInputs;
pub use state::AppState;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
