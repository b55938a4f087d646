//! Background task advancing the match clock without controller input.

use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior, interval};
use tracing::{debug, info};

use crate::state::{MatchRecord, SharedState, clock};

/// What a single tick did to the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TickOutcome {
    /// Clock not running; nothing touched.
    Idle,
    /// Still inside the last observed second.
    Unchanged,
    /// Timer string rewritten for `second`; `stopped` when the half cap was hit.
    Advanced { second: u64, stopped: bool },
}

/// Polls the clock against wall time and publishes on visible changes.
///
/// Polling happens every tick so a freshly started clock shows up quickly,
/// while publishing only happens when the displayed second changes.
pub struct TimerDriver {
    state: SharedState,
    last_second: Option<u64>,
}

impl TimerDriver {
    /// Driver with no observed second yet.
    pub fn new(state: SharedState) -> Self {
        Self {
            state,
            last_second: None,
        }
    }

    /// Tick forever every `period`.
    pub async fn run(mut self, period: Duration) {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            self.tick(Instant::now()).await;
        }
    }

    /// Run one polling step at `now`, returning whether a snapshot was published.
    pub async fn tick(&mut self, now: Instant) -> bool {
        let last_second = self.last_second;
        let outcome = self
            .state
            .store()
            .mutate(|record| advance(record, now, last_second))
            .await;

        match outcome {
            TickOutcome::Idle => {
                self.last_second = None;
                false
            }
            TickOutcome::Unchanged => false,
            TickOutcome::Advanced { second, stopped } => {
                if stopped {
                    info!(elapsed = second, "half time cap reached; clock stopped");
                    self.last_second = None;
                } else {
                    self.last_second = Some(second);
                }
                let delivered = self.state.broadcaster().publish().await;
                debug!(elapsed = second, delivered, "clock tick published");
                true
            }
        }
    }
}

fn advance(record: &mut MatchRecord, now: Instant, last_second: Option<u64>) -> TickOutcome {
    if !record.state.running {
        return TickOutcome::Idle;
    }

    let cap = clock::cap(record.state.half, record.state.half_length);
    let mut elapsed = record.clock.elapsed_now(now);
    let stopped = elapsed >= cap;
    if stopped {
        elapsed = cap;
        record.state.running = false;
        record.clock = clock::ClockOffset::stopped_at(cap);
    }

    if !stopped && last_second == Some(elapsed) {
        return TickOutcome::Unchanged;
    }

    record.state.timer = clock::format(elapsed);
    TickOutcome::Advanced {
        second: elapsed,
        stopped,
    }
}
