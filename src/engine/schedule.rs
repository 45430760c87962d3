//! Recurring tick schedule seam

/// Owner of the once-per-second tick source driving an engine.
///
/// Implementations must never stack schedules: `schedule` while already
/// active is ignored, and `cancel` while inactive is a no-op.
pub trait TickSchedule {
    fn schedule(&mut self);
    fn cancel(&mut self);
}

/// Schedule stepped by hand, for driving an engine without a clock
#[derive(Debug, Default, Clone)]
pub struct ManualSchedule {
    active: bool,
    scheduled: usize,
    cancelled: usize,
}

impl ManualSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether ticks would currently be delivered
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Number of times a schedule was actually armed
    pub fn scheduled_count(&self) -> usize {
        self.scheduled
    }

    /// Number of times an active schedule was cancelled
    pub fn cancelled_count(&self) -> usize {
        self.cancelled
    }
}

impl TickSchedule for ManualSchedule {
    fn schedule(&mut self) {
        if !self.active {
            self.active = true;
            self.scheduled += 1;
        }
    }

    fn cancel(&mut self) {
        if self.active {
            self.active = false;
            self.cancelled += 1;
        }
    }
}
