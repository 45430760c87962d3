//! Countdown engine module
//! 
//! This module contains the countdown state machine and the seams it uses to
//! talk to the outside world: an event sink and a tick schedule.

pub mod display;
pub mod error;
pub mod events;
pub mod plan;
pub mod schedule;
pub mod timer_engine;

// Re-export main types
pub use display::format_display;
pub use error::ValidationError;
pub use events::{TimerEvent, TimerSink};
pub use plan::{CountdownPlan, DEFAULT_WARNING_MESSAGE};
pub use schedule::{ManualSchedule, TickSchedule};
pub use timer_engine::{StartOutcome, TickResult, TimerEngine, TimerPhase, TimerSnapshot};
