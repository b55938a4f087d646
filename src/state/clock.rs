//! Match clock arithmetic.
//!
//! Elapsed time is always derived from the monotonic clock while the match is
//! running; [`ClockOffset`] only stores a checkpoint plus the instant at which
//! the current running segment began. Nothing here touches shared state.

use tokio::time::Instant;

/// Seconds in one minute of match time.
const SECONDS_PER_MINUTE: u64 = 60;

/// Process-local timer bookkeeping that never leaves the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClockOffset {
    /// Elapsed seconds committed at the last pause/stop/import.
    elapsed_seconds: u64,
    /// Start of the current running segment, `None` while stopped.
    running_since: Option<Instant>,
}

impl ClockOffset {
    /// Clock frozen at `elapsed_seconds`.
    pub fn stopped_at(elapsed_seconds: u64) -> Self {
        Self {
            elapsed_seconds,
            running_since: None,
        }
    }

    /// Clock that behaves as if it had been running for `elapsed_seconds` at `now`.
    pub fn running_from(elapsed_seconds: u64, now: Instant) -> Self {
        Self {
            elapsed_seconds,
            running_since: Some(now),
        }
    }

    /// Whether a running segment is in progress.
    pub fn is_running(&self) -> bool {
        self.running_since.is_some()
    }

    /// Last committed checkpoint, ignoring any running segment.
    pub fn checkpoint(&self) -> u64 {
        self.elapsed_seconds
    }

    /// Whole seconds elapsed as of `now`.
    ///
    /// A stopped clock returns its checkpoint. A running clock adds the time
    /// since the segment began, truncated to whole seconds and never negative
    /// even if `now` precedes the segment start.
    pub fn elapsed_now(&self, now: Instant) -> u64 {
        match self.running_since {
            Some(since) => self
                .elapsed_seconds
                .saturating_add(now.saturating_duration_since(since).as_secs()),
            None => self.elapsed_seconds,
        }
    }

    /// Freeze the clock at its current value and return it.
    pub fn pause(&mut self, now: Instant) -> u64 {
        let elapsed = self.elapsed_now(now);
        *self = Self::stopped_at(elapsed);
        elapsed
    }
}

/// Running-time cap for the given half.
///
/// Elapsed time is cumulative across halves, so the second and later halves
/// cap at the full match length. Non-positive half lengths cap at zero.
pub fn cap(half: i32, half_length_minutes: i32) -> u64 {
    let minutes = u64::try_from(half_length_minutes).unwrap_or(0);
    let per_half = minutes.saturating_mul(SECONDS_PER_MINUTE);
    if half >= 2 {
        per_half.saturating_mul(2)
    } else {
        per_half
    }
}

/// Render seconds as zero-padded `MM:SS`. Minutes are not wrapped.
pub fn format(seconds: u64) -> String {
    format!(
        "{:02}:{:02}",
        seconds / SECONDS_PER_MINUTE,
        seconds % SECONDS_PER_MINUTE
    )
}

/// Parse an `MM:SS` display value back into seconds.
///
/// Anything other than exactly two non-negative integers with seconds below
/// sixty yields `0`.
pub fn parse(timer: &str) -> u64 {
    let mut parts = timer.split(':');
    let (Some(minutes), Some(seconds), None) = (parts.next(), parts.next(), parts.next()) else {
        return 0;
    };

    match (minutes.parse::<u64>(), seconds.parse::<u64>()) {
        (Ok(minutes), Ok(seconds)) if seconds < SECONDS_PER_MINUTE => minutes
            .saturating_mul(SECONDS_PER_MINUTE)
            .saturating_add(seconds),
        _ => 0,
    }
}
