use axum::{
    Router,
    extract::Request,
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
};
use tower_http::services::ServeDir;

use crate::state::SharedState;

/// Logo color derivation.
pub mod colors;
/// Swagger UI.
pub mod docs;
/// Health check.
pub mod health;
/// State reads, edits, import and export.
pub mod scoreboard;
/// Saved snapshots.
pub mod snapshots;
/// SSE viewer stream.
pub mod sse;
/// Clock and side commands.
pub mod timer;
/// WebSocket viewer stream.
pub mod websocket;

const CONTROL_PATH: &str = "/ovladani";
const SAVED_PATH: &str = "/saved";

/// Compose all route trees, wiring in shared state, documentation and static files.
///
/// The display UI is served from the root as a fallback, the control UI under
/// `/ovladani/` and raw snapshot files under `/saved/`.
pub fn router(state: SharedState) -> Router<()> {
    let config = state.config();
    let static_files = ServeDir::new(config.static_dir());
    let control_files = ServeDir::new(config.control_dir());
    let saved_files = ServeDir::new(config.saves_dir());

    let api_router = health::router()
        .merge(scoreboard::router())
        .merge(timer::router())
        .merge(snapshots::router())
        .merge(colors::router())
        .merge(sse::router())
        .merge(websocket::router());

    let docs_router = docs::router(state.clone());

    api_router
        .merge(docs_router)
        .nest_service(CONTROL_PATH, control_files)
        .nest_service(SAVED_PATH, saved_files)
        .fallback_service(static_files)
        .layer(middleware::from_fn(redirect_control_root))
        .with_state(state)
}

/// `/ovladani` without the trailing slash would break relative links in the control UI.
async fn redirect_control_root(request: Request, next: Next) -> Response {
    if request.uri().path() == CONTROL_PATH {
        return Redirect::permanent("/ovladani/").into_response();
    }
    next.run(request).await
}
