use axum::{
    Json, Router,
    body::Bytes,
    extract::{FromRequest, Multipart, Request, State, rejection::JsonRejection},
    http::header,
    response::IntoResponse,
    routing::{get, post},
};

use crate::{
    dto::update::UpdateRequest,
    error::AppError,
    services::match_service,
    state::{MatchState, SharedState},
};

const EXPORT_DISPOSITION: &str = "attachment; filename=\"scoreboard-state.json\"";
const UPLOAD_FIELD: &str = "file";

/// Read access and whole-record edits of the scoreboard.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new()
        .route("/api/state", get(get_state))
        .route("/api/update", post(update))
        .route("/api/import", post(import))
        .route("/api/export", get(export))
}

/// Current scoreboard state.
#[utoipa::path(
    get,
    path = "/api/state",
    tag = "scoreboard",
    responses((status = 200, description = "Current scoreboard state", body = MatchState))
)]
pub async fn get_state(State(state): State<SharedState>) -> Json<MatchState> {
    Json(match_service::current_state(&state).await)
}

/// Edit names, logos, score, theme, half length, short codes or colors.
#[utoipa::path(
    post,
    path = "/api/update",
    tag = "scoreboard",
    request_body = UpdateRequest,
    responses(
        (status = 200, description = "Updated scoreboard state", body = MatchState),
        (status = 400, description = "Malformed payload or color")
    )
)]
pub async fn update(
    State(state): State<SharedState>,
    payload: Result<Json<UpdateRequest>, JsonRejection>,
) -> Result<Json<MatchState>, AppError> {
    let Json(request) = payload?;
    Ok(Json(match_service::update_fields(&state, request).await?))
}

/// Replace the whole state from a JSON body or a multipart `file` upload.
#[utoipa::path(
    post,
    path = "/api/import",
    tag = "scoreboard",
    request_body(content = MatchState, description = "Full state as JSON, or multipart form with a `file` field"),
    responses(
        (status = 200, description = "Imported scoreboard state", body = MatchState),
        (status = 400, description = "Invalid JSON")
    )
)]
pub async fn import(
    State(state): State<SharedState>,
    request: Request,
) -> Result<Json<MatchState>, AppError> {
    let payload = if is_multipart(&request) {
        let multipart = Multipart::from_request(request, &state)
            .await
            .map_err(|err| AppError::BadRequest(err.body_text()))?;
        uploaded_file(multipart).await?
    } else {
        Bytes::from_request(request, &state)
            .await
            .map_err(|err| AppError::BadRequest(err.body_text()))?
    };

    Ok(Json(match_service::import_state(&state, &payload).await?))
}

/// Download the current state as a JSON attachment.
#[utoipa::path(
    get,
    path = "/api/export",
    tag = "scoreboard",
    responses((status = 200, description = "State as `scoreboard-state.json` attachment", body = MatchState))
)]
pub async fn export(State(state): State<SharedState>) -> impl IntoResponse {
    let snapshot = match_service::current_state(&state).await;
    (
        [(header::CONTENT_DISPOSITION, EXPORT_DISPOSITION)],
        Json(snapshot),
    )
}

fn is_multipart(request: &Request) -> bool {
    request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("multipart/form-data"))
}

async fn uploaded_file(mut multipart: Multipart) -> Result<Bytes, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::BadRequest(err.body_text()))?
    {
        if field.name() == Some(UPLOAD_FIELD) {
            return field
                .bytes()
                .await
                .map_err(|err| AppError::BadRequest(err.body_text()));
        }
    }
    Err(AppError::BadRequest(format!(
        "missing multipart field `{UPLOAD_FIELD}`"
    )))
}
