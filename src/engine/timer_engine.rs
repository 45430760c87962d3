//! Countdown state machine

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use super::{
    format_display, CountdownPlan, TickSchedule, TimerEvent, TimerSink, ValidationError,
};

/// Lifecycle phase of a countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerPhase {
    Idle,
    Running,
    WarningActive,
    Completed,
}

impl TimerPhase {
    /// Whether ticks are being processed in this phase
    pub fn is_counting(self) -> bool {
        matches!(self, Self::Running | Self::WarningActive)
    }
}

/// Result of a start request that passed the running guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    /// A countdown was already in progress; nothing changed
    AlreadyRunning,
}

/// Result of advancing the engine by one second
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickResult {
    /// The engine was not counting, the tick was dropped
    Inactive,
    Advanced {
        remaining_seconds: u64,
        warning_raised: bool,
        completed: bool,
    },
}

/// Point-in-time view of the engine, for status reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub phase: TimerPhase,
    pub total_seconds: u64,
    pub remaining_seconds: u64,
    pub warning_threshold_seconds: u64,
    pub warning_message: String,
    pub warning_active: bool,
    pub display: String,
}

/// Countdown engine driven by explicit ticks.
///
/// Every state change is reported to the sink `S`; the recurring tick source
/// is requested from and cancelled through `C`. The engine never reads a
/// clock itself.
#[derive(Debug)]
pub struct TimerEngine<S, C> {
    total_seconds: u64,
    remaining_seconds: u64,
    warning_threshold_seconds: u64,
    warning_message: String,
    warning_triggered: bool,
    phase: TimerPhase,
    sink: S,
    schedule: C,
}

impl<S: TimerSink, C: TickSchedule> TimerEngine<S, C> {
    /// Create an idle engine and announce a zeroed display
    pub fn new(sink: S, schedule: C) -> Self {
        let mut engine = Self {
            total_seconds: 0,
            remaining_seconds: 0,
            warning_threshold_seconds: 0,
            warning_message: String::new(),
            warning_triggered: false,
            phase: TimerPhase::Idle,
            sink,
            schedule,
        };
        engine.emit_display(0);
        engine
    }

    /// Arm a countdown of `hours` with a warning `warning_minutes` before the end.
    ///
    /// A no-op while a countdown is in progress. On validation failure the
    /// engine is left untouched.
    pub fn start(
        &mut self,
        hours: f64,
        warning_minutes: f64,
        message: &str,
    ) -> Result<StartOutcome, ValidationError> {
        if self.phase.is_counting() {
            debug!("Start ignored, countdown already in progress ({:?})", self.phase);
            return Ok(StartOutcome::AlreadyRunning);
        }

        let plan = CountdownPlan::new(hours, warning_minutes, message)?;

        self.total_seconds = plan.total_seconds;
        self.remaining_seconds = plan.total_seconds;
        self.warning_threshold_seconds = plan.warning_threshold_seconds;
        self.warning_message = plan.warning_message;
        self.warning_triggered = false;
        self.phase = TimerPhase::Running;

        info!(
            "Countdown started: {}s total, warning at {}s",
            self.total_seconds, self.warning_threshold_seconds
        );

        self.sink.emit(TimerEvent::Started {
            total_seconds: self.total_seconds,
            warning_threshold_seconds: self.warning_threshold_seconds,
            warning_message: self.warning_message.clone(),
        });
        self.emit_display(self.remaining_seconds);
        self.schedule.schedule();

        Ok(StartOutcome::Started)
    }

    /// Advance the countdown by one second
    pub fn tick(&mut self) -> TickResult {
        if !self.phase.is_counting() {
            trace!("Tick dropped in {:?}", self.phase);
            return TickResult::Inactive;
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        trace!("Tick: {}s remaining", self.remaining_seconds);
        self.emit_display(self.remaining_seconds);

        // Warning is checked before completion so a tick hitting both emits both in order
        let warning_raised =
            !self.warning_triggered && self.remaining_seconds <= self.warning_threshold_seconds;
        if warning_raised {
            self.warning_triggered = true;
            self.phase = TimerPhase::WarningActive;
            info!("Warning threshold reached with {}s remaining", self.remaining_seconds);
            self.sink.emit(TimerEvent::WarningRaised {
                message: self.warning_message.clone(),
            });
        }

        let completed = self.remaining_seconds == 0;
        if completed {
            self.schedule.cancel();
            self.phase = TimerPhase::Completed;
            info!("Countdown complete");
            self.sink.emit(TimerEvent::CountdownComplete);
        }

        TickResult::Advanced {
            remaining_seconds: self.remaining_seconds,
            warning_raised,
            completed,
        }
    }

    /// Cancel any schedule and return to idle from any phase
    pub fn reset(&mut self) {
        self.schedule.cancel();

        if self.phase != TimerPhase::Idle {
            info!("Countdown reset from {:?}", self.phase);
        }

        self.total_seconds = 0;
        self.remaining_seconds = 0;
        self.warning_threshold_seconds = 0;
        self.warning_message.clear();
        self.warning_triggered = false;
        self.phase = TimerPhase::Idle;

        self.emit_display(0);
        self.sink.emit(TimerEvent::WarningCleared);
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            phase: self.phase,
            total_seconds: self.total_seconds,
            remaining_seconds: self.remaining_seconds,
            warning_threshold_seconds: self.warning_threshold_seconds,
            warning_message: self.warning_message.clone(),
            warning_active: self.warning_triggered,
            display: format_display(self.remaining_seconds),
        }
    }

    fn emit_display(&mut self, seconds: u64) {
        self.sink.emit(TimerEvent::Display {
            text: format_display(seconds),
        });
    }
}

impl<S, C> TimerEngine<S, C> {
    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn total_seconds(&self) -> u64 {
        self.total_seconds
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    pub fn warning_threshold_seconds(&self) -> u64 {
        self.warning_threshold_seconds
    }

    pub fn warning_message(&self) -> &str {
        &self.warning_message
    }

    /// Whether the warning has fired during the current run
    pub fn warning_triggered(&self) -> bool {
        self.warning_triggered
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn schedule(&self) -> &C {
        &self.schedule
    }
}
