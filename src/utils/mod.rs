//! Utility functions module
//! 
//! Process-level helpers that do not belong to the countdown itself.

pub mod signals;

pub use signals::shutdown_signal;
