//! Background tasks module
//! 
//! This module contains the tasks that run alongside the HTTP server: the
//! once-per-second countdown ticker and the console event log.

pub mod countdown_ticker;
pub mod event_log;

// Re-export main items
pub use countdown_ticker::{countdown_ticker_task, TokioTicker};
pub use event_log::event_log_task;
