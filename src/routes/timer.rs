use axum::{Json, Router, extract::State, routing::post};

use crate::{
    services::match_service,
    state::{MatchState, SharedState},
};

/// Clock and side controls. Each command answers with the resulting state.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new()
        .route("/api/timer/start", post(start))
        .route("/api/timer/pause", post(pause))
        .route("/api/timer/reset", post(reset))
        .route("/api/timer/secondHalf", post(second_half))
        .route("/api/swapSides", post(swap_sides))
}

/// Start the clock, resuming from the displayed time.
#[utoipa::path(
    post,
    path = "/api/timer/start",
    tag = "timer",
    responses((status = 200, description = "Clock running", body = MatchState))
)]
pub async fn start(State(state): State<SharedState>) -> Json<MatchState> {
    Json(match_service::start_timer(&state).await)
}

/// Stop the clock, keeping the elapsed time.
#[utoipa::path(
    post,
    path = "/api/timer/pause",
    tag = "timer",
    responses((status = 200, description = "Clock paused", body = MatchState))
)]
pub async fn pause(State(state): State<SharedState>) -> Json<MatchState> {
    Json(match_service::pause_timer(&state).await)
}

/// Stop the clock and return to `00:00` in the first half.
#[utoipa::path(
    post,
    path = "/api/timer/reset",
    tag = "timer",
    responses((status = 200, description = "Clock reset", body = MatchState))
)]
pub async fn reset(State(state): State<SharedState>) -> Json<MatchState> {
    Json(match_service::reset_timer(&state).await)
}

/// Swap sides and run the second half from the end of the first.
#[utoipa::path(
    post,
    path = "/api/timer/secondHalf",
    tag = "timer",
    responses((status = 200, description = "Second half running", body = MatchState))
)]
pub async fn second_half(State(state): State<SharedState>) -> Json<MatchState> {
    Json(match_service::start_second_half(&state).await)
}

/// Mirror the team sides on displays.
#[utoipa::path(
    post,
    path = "/api/swapSides",
    tag = "timer",
    responses((status = 200, description = "Sides swapped", body = MatchState))
)]
pub async fn swap_sides(State(state): State<SharedState>) -> Json<MatchState> {
    Json(match_service::swap_sides(&state).await)
}
