use axum::{
    Json, Router,
    body::Bytes,
    extract::{Query, State, rejection::QueryRejection},
    routing::{get, post},
};
use tracing::debug;

use crate::{
    dto::snapshot::{SaveResponse, SnapshotName},
    error::AppError,
    services::snapshot_service,
    state::{MatchState, SharedState},
};

/// Named snapshots stored next to the server.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new()
        .route("/api/save", post(save))
        .route("/api/saves", get(list))
        .route("/api/load", post(load))
}

/// Save the current state; the name comes from the query or a JSON body.
#[utoipa::path(
    post,
    path = "/api/save",
    tag = "snapshots",
    params(SnapshotName),
    request_body(content = SnapshotName, description = "Optional, used when the query has no filename"),
    responses(
        (status = 200, description = "Snapshot written", body = SaveResponse),
        (status = 500, description = "Saves directory not writable")
    )
)]
pub async fn save(
    State(state): State<SharedState>,
    query: Result<Query<SnapshotName>, QueryRejection>,
    body: Bytes,
) -> Result<Json<SaveResponse>, AppError> {
    let Query(query) = query?;
    let filename = query.filename.or_else(|| filename_from_body(&body));
    Ok(Json(snapshot_service::save(&state, filename).await?))
}

/// List saved snapshot files.
#[utoipa::path(
    get,
    path = "/api/saves",
    tag = "snapshots",
    responses((status = 200, description = "Snapshot file names", body = [String]))
)]
pub async fn list(State(state): State<SharedState>) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(snapshot_service::list(&state).await?))
}

/// Replace the current state with a saved snapshot.
#[utoipa::path(
    post,
    path = "/api/load",
    tag = "snapshots",
    params(SnapshotName),
    responses(
        (status = 200, description = "Loaded scoreboard state", body = MatchState),
        (status = 400, description = "Missing filename or invalid snapshot"),
        (status = 404, description = "Snapshot not found")
    )
)]
pub async fn load(
    State(state): State<SharedState>,
    query: Result<Query<SnapshotName>, QueryRejection>,
) -> Result<Json<MatchState>, AppError> {
    let Query(query) = query?;
    Ok(Json(snapshot_service::load(&state, query.filename).await?))
}

fn filename_from_body(body: &[u8]) -> Option<String> {
    if body.is_empty() {
        return None;
    }
    match serde_json::from_slice::<SnapshotName>(body) {
        Ok(name) => name.filename,
        Err(err) => {
            debug!(error = %err, "ignoring unreadable save body");
            None
        }
    }
}
