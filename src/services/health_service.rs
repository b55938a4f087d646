use crate::{dto::health::HealthResponse, state::SharedState};

/// Report liveness together with the current viewer count.
pub fn health_status(state: &SharedState) -> HealthResponse {
    HealthResponse::ok(state.broadcaster().subscriber_count())
}
