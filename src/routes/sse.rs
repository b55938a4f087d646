use std::convert::Infallible;

use axum::{
    Router,
    extract::State,
    response::sse::{Event, Sse},
    routing::get,
};
use futures::Stream;

use crate::{services::sse_service, state::SharedState};

#[utoipa::path(
    get,
    path = "/api/stream",
    tag = "viewers",
    responses((status = 200, description = "Current state, then one `data:` event per change", content_type = "text/event-stream", body = String))
)]
/// Stream full scoreboard snapshots to a display.
pub async fn stream(
    State(state): State<SharedState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let subscription = sse_service::subscribe(&state).await;
    sse_service::to_sse_stream(subscription, state.config().keep_alive())
}

/// Configure the SSE endpoint.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new().route("/api/stream", get(stream))
}
