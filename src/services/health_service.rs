use crate::{
    dto::health::HealthResponse,
    state::{SharedState, game::now_ms},
};

/// Respond with the process health, its uptime, and the current time.
pub fn health_status(state: &SharedState) -> HealthResponse {
    HealthResponse::healthy(state.uptime_secs(), now_ms())
}
