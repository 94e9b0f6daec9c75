use axum::{Json, Router, extract::State, routing::get};

use crate::{dto::stats::StatsResponse, services::game_service, state::SharedState};

#[utoipa::path(
    get,
    path = "/api/stats",
    tag = "stats",
    responses((status = 200, description = "Aggregate game statistics", body = StatsResponse))
)]
/// Aggregate counters over every known user plus the last save time.
pub async fn get_stats(State(state): State<SharedState>) -> Json<StatsResponse> {
    Json(game_service::stats(&state).await)
}

/// Configure the stats routes subtree.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new().route("/api/stats", get(get_stats))
}
