//! Once-per-period recomputation of the time left, as a cancellable subscription.

use crate::countdown::calculate_time_left;
use crate::models::TimeRemaining;
use chrono::{Local, NaiveDateTime};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

pub const TICK_PERIOD: Duration = Duration::from_millis(1000);

pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> NaiveDateTime;
}

/// Local wall clock; targets carry no timezone so both sides stay naive.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Owns the background tick. Dropping the handle aborts the task.
#[derive(Debug)]
pub struct TickerHandle {
    remaining: watch::Receiver<TimeRemaining>,
    target: watch::Sender<NaiveDateTime>,
    task: JoinHandle<()>,
}

/// Computes immediately, then every `period` until the handle is stopped.
pub fn spawn<C: Clock>(target: NaiveDateTime, clock: C, period: Duration) -> TickerHandle {
    let initial = calculate_time_left(target, clock.now());
    let (remaining_tx, remaining) = watch::channel(initial);
    let (target_tx, target_rx) = watch::channel(target);
    let task = tokio::spawn(run(clock, period, target_rx, remaining_tx));
    debug!(%target, ?period, "ticker started");

    TickerHandle {
        remaining,
        target: target_tx,
        task,
    }
}

impl TickerHandle {
    pub fn current(&self) -> TimeRemaining {
        *self.remaining.borrow()
    }

    /// Waits for the next recomputation. `None` once the task has ended.
    pub async fn changed(&mut self) -> Option<TimeRemaining> {
        self.remaining.changed().await.ok()?;
        Some(*self.remaining.borrow_and_update())
    }

    pub fn subscribe(&self) -> watch::Receiver<TimeRemaining> {
        self.remaining.clone()
    }

    /// Recomputes right away for the new target and restarts the period.
    pub fn retarget(&self, target: NaiveDateTime) {
        self.target.send_replace(target);
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    pub fn stop(self) {}
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.task.abort();
        debug!("ticker stopped");
    }
}

async fn run<C: Clock>(
    clock: C,
    period: Duration,
    mut target: watch::Receiver<NaiveDateTime>,
    remaining: watch::Sender<TimeRemaining>,
) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = interval.tick() => {}
            changed = target.changed() => {
                if changed.is_err() {
                    break;
                }
                interval.reset();
            }
        }

        let current = *target.borrow_and_update();
        if remaining
            .send(calculate_time_left(current, clock.now()))
            .is_err()
        {
            break;
        }
    }
}
