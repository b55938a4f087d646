//! Controller commands. Each one mutates the record through the store in a
//! single critical section, then publishes the result to every viewer.

use tokio::time::Instant;
use tracing::{debug, info};
use validator::Validate;

use crate::{
    dto::update::UpdateRequest,
    error::ServiceError,
    state::{
        MatchRecord, MatchState, SharedState,
        clock::{self, ClockOffset},
        short_code,
    },
};

/// Return a copy of the current record.
pub async fn current_state(state: &SharedState) -> MatchState {
    state.store().read().await
}

/// Apply a controller edit to the identity, score, theme and color fields.
///
/// Rejected payloads leave the record untouched and publish nothing.
pub async fn update_fields(
    state: &SharedState,
    request: UpdateRequest,
) -> Result<MatchState, ServiceError> {
    request.validate()?;

    let updated = state
        .store()
        .mutate(|record| {
            apply_update(&mut record.state, request);
            record.state.clone()
        })
        .await;

    debug!("scoreboard fields updated");
    state.broadcaster().publish().await;
    Ok(updated)
}

fn apply_update(target: &mut MatchState, request: UpdateRequest) {
    let UpdateRequest {
        home_name,
        home_logo,
        home_score,
        away_name,
        away_logo,
        away_score,
        half_length,
        theme,
        home_short,
        away_short,
        primary_color,
        secondary_color,
    } = request;

    let home_renamed = set_if_changed(&mut target.home_name, home_name);
    let away_renamed = set_if_changed(&mut target.away_name, away_name);

    if let Some(logo) = home_logo {
        target.home_logo = logo;
    }
    if let Some(logo) = away_logo {
        target.away_logo = logo;
    }
    if let Some(score) = home_score {
        target.home_score = score;
    }
    if let Some(score) = away_score {
        target.away_score = score;
    }
    if let Some(minutes) = half_length {
        target.half_length = minutes;
    }
    if let Some(theme) = theme {
        target.theme = theme;
    }

    target.home_short = next_short_code(
        &target.home_short,
        home_short,
        &target.home_name,
        home_renamed,
    );
    target.away_short = next_short_code(
        &target.away_short,
        away_short,
        &target.away_name,
        away_renamed,
    );

    if let Some(color) = primary_color.filter(|color| !color.is_empty()) {
        target.primary_color = color;
    }
    if let Some(color) = secondary_color.filter(|color| !color.is_empty()) {
        target.secondary_color = color;
    }
}

fn set_if_changed(field: &mut String, value: Option<String>) -> bool {
    match value {
        Some(value) if *field != value => {
            *field = value;
            true
        }
        _ => false,
    }
}

/// An explicit code wins when valid; an invalid one, or a rename without a
/// code, regenerates from the name; otherwise the current code stays.
fn next_short_code(
    current: &str,
    requested: Option<String>,
    name: &str,
    renamed: bool,
) -> String {
    match requested {
        Some(code) => short_code::resolve(&code, name),
        None if renamed => short_code::derive(name),
        None => short_code::resolve(current, name),
    }
}

/// Start (or restart) the clock from the displayed timer value.
pub async fn start_timer(state: &SharedState) -> MatchState {
    let started = state
        .store()
        .mutate(|record| {
            let now = Instant::now();
            let elapsed = if record.state.timer.is_empty() {
                record.clock.elapsed_now(now)
            } else {
                clock::parse(&record.state.timer)
            };
            if record.state.half < 1 {
                record.state.half = 1;
            }
            resume(record, elapsed, now);
            record.state.clone()
        })
        .await;

    info!(timer = %started.timer, half = started.half, "clock started");
    state.broadcaster().publish().await;
    started
}

/// Freeze the clock at its current derived value.
///
/// A running clock is clamped to the half cap; a stopped one keeps its value.
pub async fn pause_timer(state: &SharedState) -> MatchState {
    let paused = state
        .store()
        .mutate(|record| {
            let elapsed = if record.clock.is_running() {
                let cap = clock::cap(record.state.half, record.state.half_length);
                record.clock.pause(Instant::now()).min(cap)
            } else {
                record.clock.checkpoint()
            };
            record.clock = ClockOffset::stopped_at(elapsed);
            record.state.running = false;
            record.state.timer = clock::format(elapsed);
            record.state.clone()
        })
        .await;

    info!(timer = %paused.timer, "clock paused");
    state.broadcaster().publish().await;
    paused
}

/// Stop the clock and rewind to the start of the first half.
pub async fn reset_timer(state: &SharedState) -> MatchState {
    let reset = state
        .store()
        .mutate(|record| {
            record.clock = ClockOffset::stopped_at(0);
            record.state.running = false;
            record.state.timer = clock::format(0);
            record.state.half = 1;
            record.state.clone()
        })
        .await;

    info!("clock reset");
    state.broadcaster().publish().await;
    reset
}

/// Toggle the cosmetic side flip. Team fields are never reordered.
pub async fn swap_sides(state: &SharedState) -> MatchState {
    let swapped = state
        .store()
        .mutate(|record| {
            record.state.sides_flipped = !record.state.sides_flipped;
            record.state.clone()
        })
        .await;

    state.broadcaster().publish().await;
    swapped
}

/// Flip sides and run the second half from no earlier than the first-half cap.
pub async fn start_second_half(state: &SharedState) -> MatchState {
    let resumed = state
        .store()
        .mutate(|record| {
            let now = Instant::now();
            record.state.sides_flipped = !record.state.sides_flipped;
            record.state.half = 2;
            let first_half = clock::cap(1, record.state.half_length);
            let elapsed = record.clock.elapsed_now(now).max(first_half);
            resume(record, elapsed, now);
            record.state.clone()
        })
        .await;

    info!(timer = %resumed.timer, "second half started");
    state.broadcaster().publish().await;
    resumed
}

/// Replace the whole record with `incoming` and publish the normalized result.
pub async fn replace_state(state: &SharedState, incoming: MatchState) -> MatchState {
    let replaced = state.store().replace(incoming).await;
    info!(timer = %replaced.timer, running = replaced.running, "scoreboard state replaced");
    state.broadcaster().publish().await;
    replaced
}

/// Decode a full JSON record and replace the current one with it.
pub async fn import_state(
    state: &SharedState,
    payload: &[u8],
) -> Result<MatchState, ServiceError> {
    let incoming: MatchState = serde_json::from_slice(payload)
        .map_err(|err| ServiceError::InvalidInput(format!("invalid JSON: {err}")))?;
    Ok(replace_state(state, incoming).await)
}

fn resume(record: &mut MatchRecord, elapsed: u64, now: Instant) {
    record.clock = ClockOffset::running_from(elapsed, now);
    record.state.running = true;
    record.state.timer = clock::format(elapsed);
}
