use axum::{
    Json, Router,
    extract::{Query, State, rejection::JsonRejection, rejection::QueryRejection},
    routing::get,
};

use crate::{
    dto::colors::{DeriveColorsRequest, DeriveColorsResponse},
    error::AppError,
    services::color_service,
    state::SharedState,
};

/// Accent color derivation from logo images.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new().route(
        "/api/colors/derive",
        get(derive_from_query).post(derive_from_body),
    )
}

/// Average color of `url`, or of `homeLogo` and `awayLogo`.
#[utoipa::path(
    get,
    path = "/api/colors/derive",
    tag = "colors",
    params(DeriveColorsRequest),
    responses(
        (status = 200, description = "Derived colors", body = DeriveColorsResponse),
        (status = 400, description = "No image given or the single image failed")
    )
)]
pub async fn derive_from_query(
    State(state): State<SharedState>,
    query: Result<Query<DeriveColorsRequest>, QueryRejection>,
) -> Result<Json<DeriveColorsResponse>, AppError> {
    let Query(request) = query?;
    Ok(Json(color_service::derive_colors(&state, request).await?))
}

/// Same as the query form, with the URLs in a JSON body.
#[utoipa::path(
    post,
    path = "/api/colors/derive",
    tag = "colors",
    request_body = DeriveColorsRequest,
    responses(
        (status = 200, description = "Derived colors", body = DeriveColorsResponse),
        (status = 400, description = "No image given or the single image failed")
    )
)]
pub async fn derive_from_body(
    State(state): State<SharedState>,
    payload: Result<Json<DeriveColorsRequest>, JsonRejection>,
) -> Result<Json<DeriveColorsResponse>, AppError> {
    let Json(request) = payload?;
    Ok(Json(color_service::derive_colors(&state, request).await?))
}
