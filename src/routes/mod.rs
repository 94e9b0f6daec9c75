use axum::Router;

use crate::{error::AppError, state::SharedState};

pub mod docs;
pub mod health;
pub mod stats;
pub mod user;

/// Compose all route trees, wiring in shared state and the 404 fallback.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = user::router()
        .merge(stats::router())
        .merge(health::router());

    let docs_router = docs::router(state.clone());

    api_router
        .merge(docs_router)
        .fallback(endpoint_not_found)
        .with_state(state)
}

/// Reply to unmatched routes with the service's canonical 404 body.
async fn endpoint_not_found() -> AppError {
    AppError::NotFound("Endpoint not found".into())
}
