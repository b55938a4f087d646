use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI document for the scoreboard backend.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::scoreboard::get_state,
        crate::routes::scoreboard::update,
        crate::routes::scoreboard::import,
        crate::routes::scoreboard::export,
        crate::routes::timer::start,
        crate::routes::timer::pause,
        crate::routes::timer::reset,
        crate::routes::timer::second_half,
        crate::routes::timer::swap_sides,
        crate::routes::snapshots::save,
        crate::routes::snapshots::list,
        crate::routes::snapshots::load,
        crate::routes::colors::derive_from_query,
        crate::routes::colors::derive_from_body,
        crate::routes::sse::stream,
        crate::routes::websocket::ws_handler,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::update::UpdateRequest,
            crate::dto::snapshot::SnapshotName,
            crate::dto::snapshot::SaveResponse,
            crate::dto::colors::DeriveColorsRequest,
            crate::dto::colors::DeriveColorsResponse,
            crate::dto::colors::SingleColor,
            crate::dto::colors::ColorPair,
            crate::state::MatchState,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "scoreboard", description = "Reading and editing the scoreboard"),
        (name = "timer", description = "Match clock and side controls"),
        (name = "snapshots", description = "Named snapshots on local disk"),
        (name = "colors", description = "Accent colors derived from logos"),
        (name = "viewers", description = "Change streams for displays"),
    )
)]
pub struct ApiDoc;
