use tokio::{sync::RwLock, time::Instant};

use crate::state::{
    clock::{self, ClockOffset},
    match_state::MatchState,
};

/// Live scoreboard record paired with its process-local clock.
#[derive(Debug, Clone)]
pub struct MatchRecord {
    /// Fields published to viewers.
    pub state: MatchState,
    /// Timer bookkeeping backing `state.timer`.
    pub clock: ClockOffset,
}

impl MatchRecord {
    /// Build a record from an externally supplied state.
    ///
    /// The state is normalized, the clock is seeded from its `timer` string
    /// (malformed values count as zero) and the timer string is regenerated
    /// from the seeded value. A running payload keeps running from `now`.
    pub fn from_snapshot(mut state: MatchState, now: Instant) -> Self {
        state.normalize();
        let elapsed = clock::parse(&state.timer);
        state.timer = clock::format(elapsed);
        let clock = if state.running {
            ClockOffset::running_from(elapsed, now)
        } else {
            ClockOffset::stopped_at(elapsed)
        };
        Self { state, clock }
    }
}

/// Single serialization point for every read and write of the match record.
///
/// Callers only ever see clones; the live record stays behind the lock.
pub struct StateStore {
    record: RwLock<MatchRecord>,
}

impl StateStore {
    /// Create a store holding `initial`, normalized as if it had been imported.
    pub fn new(initial: MatchState) -> Self {
        Self {
            record: RwLock::new(MatchRecord::from_snapshot(initial, Instant::now())),
        }
    }

    /// Copy of the current state.
    pub async fn read(&self) -> MatchState {
        self.record.read().await.state.clone()
    }

    /// Run `work` against the live record with exclusive access.
    ///
    /// `work` must stay a quick in-memory transformation: no I/O, no awaiting.
    pub async fn mutate<F, T>(&self, work: F) -> T
    where
        F: FnOnce(&mut MatchRecord) -> T,
    {
        let mut guard = self.record.write().await;
        work(&mut guard)
    }

    /// Atomically swap the whole record for `state`, returning the normalized copy.
    pub async fn replace(&self, state: MatchState) -> MatchState {
        let mut guard = self.record.write().await;
        *guard = MatchRecord::from_snapshot(state, Instant::now());
        guard.state.clone()
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new(MatchState::initial())
    }
}
