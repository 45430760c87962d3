//! Real-clock tick schedule for the live engine

use std::{sync::Weak, time::Duration};
use tokio::{
    runtime::Handle,
    sync::oneshot::{self, error::TryRecvError},
    time::{interval_at, Instant},
};
use tracing::{debug, error};

use crate::{
    engine::{TickResult, TickSchedule},
    state::AppState,
};

/// Tick schedule backed by a tokio interval task.
///
/// At most one task runs at a time. Cancelling drops the task's oneshot,
/// which the task re-checks under the engine lock before every tick.
#[derive(Debug)]
pub struct TokioTicker {
    state: Weak<AppState>,
    period: Duration,
    cancel_tx: Option<oneshot::Sender<()>>,
}

impl TokioTicker {
    pub fn new(state: Weak<AppState>, period: Duration) -> Self {
        Self {
            state,
            period,
            cancel_tx: None,
        }
    }
}

impl TickSchedule for TokioTicker {
    fn schedule(&mut self) {
        if self.cancel_tx.is_some() {
            debug!("Countdown ticker already running");
            return;
        }

        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                error!("Cannot schedule countdown ticks without a tokio runtime: {}", e);
                return;
            }
        };

        let (cancel_tx, cancel_rx) = oneshot::channel();
        handle.spawn(countdown_ticker_task(self.state.clone(), self.period, cancel_rx));
        self.cancel_tx = Some(cancel_tx);
        debug!("Countdown ticker scheduled every {:?}", self.period);
    }

    fn cancel(&mut self) {
        if let Some(cancel_tx) = self.cancel_tx.take() {
            // The task may already have stopped on its own
            let _ = cancel_tx.send(());
            debug!("Countdown ticker cancelled");
        }
    }
}

/// Background task delivering one tick per `period` until cancelled
pub async fn countdown_ticker_task(
    state: Weak<AppState>,
    period: Duration,
    mut cancel_rx: oneshot::Receiver<()>,
) {
    debug!("Starting countdown ticker task");

    // First tick lands one full period after start
    let mut interval = interval_at(Instant::now() + period, period);

    loop {
        tokio::select! {
            _ = interval.tick() => {}
            _ = &mut cancel_rx => break,
        }

        let Some(shared) = state.upgrade() else {
            debug!("Application state dropped, stopping ticker");
            break;
        };

        if !deliver_tick(&shared, &mut cancel_rx) {
            break;
        }
    }

    debug!("Countdown ticker task stopped");
}

/// Tick the engine once. Returns whether the task should keep running.
fn deliver_tick(state: &AppState, cancel_rx: &mut oneshot::Receiver<()>) -> bool {
    let mut engine = match state.engine.lock() {
        Ok(engine) => engine,
        Err(e) => {
            error!("Failed to lock timer engine: {}", e);
            return false;
        }
    };

    // Cancellation always happens with the engine lock held
    if !matches!(cancel_rx.try_recv(), Err(TryRecvError::Empty)) {
        return false;
    }

    match engine.tick() {
        TickResult::Inactive | TickResult::Advanced { completed: true, .. } => false,
        TickResult::Advanced { .. } => true,
    }
}
