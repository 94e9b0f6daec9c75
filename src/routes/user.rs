use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};

use crate::{
    dto::{
        bytes::{
            AddBytesRequest, AddBytesResponse, BalanceResponse, PurchaseUpgradeRequest,
            PurchaseUpgradeResponse, RemoveBytesRequest, RemoveBytesResponse,
        },
        user::PublicUser,
    },
    error::AppError,
    services::game_service,
    state::SharedState,
    state::game::UserRecord,
};

/// Routes handling per-user currency and upgrade operations.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/api/user/{user_id}", get(get_user))
        .route("/api/user/{user_id}/bytes", get(get_balance))
        .route("/api/user/{user_id}/bytes/add", post(add_bytes))
        .route("/api/user/{user_id}/bytes/remove", post(remove_bytes))
        .route("/api/user/{user_id}/upgrade", post(purchase_upgrade))
        .route("/api/users", get(list_users))
}

/// Fetch the full record for a user, creating it on first reference.
#[utoipa::path(
    get,
    path = "/api/user/{user_id}",
    tag = "user",
    params(("user_id" = String, Path, description = "Client-chosen user identifier")),
    responses((status = 200, description = "Full user record", body = UserRecord))
)]
pub async fn get_user(
    State(state): State<SharedState>,
    Path(user_id): Path<String>,
) -> Json<UserRecord> {
    Json(game_service::fetch_user(&state, &user_id).await)
}

/// Fetch the balance summary for a user.
#[utoipa::path(
    get,
    path = "/api/user/{user_id}/bytes",
    tag = "user",
    params(("user_id" = String, Path, description = "Client-chosen user identifier")),
    responses((status = 200, description = "Balance summary", body = BalanceResponse))
)]
pub async fn get_balance(
    State(state): State<SharedState>,
    Path(user_id): Path<String>,
) -> Json<BalanceResponse> {
    Json(game_service::balance(&state, &user_id).await)
}

/// Credit bytes to a user, scaled by their multiplier.
#[utoipa::path(
    post,
    path = "/api/user/{user_id}/bytes/add",
    tag = "user",
    params(("user_id" = String, Path, description = "Client-chosen user identifier")),
    request_body = AddBytesRequest,
    responses(
        (status = 200, description = "Bytes credited", body = AddBytesResponse),
        (status = 400, description = "Invalid amount")
    )
)]
pub async fn add_bytes(
    State(state): State<SharedState>,
    Path(user_id): Path<String>,
    Json(payload): Json<AddBytesRequest>,
) -> Result<Json<AddBytesResponse>, AppError> {
    let response = game_service::add_bytes(&state, &user_id, payload).await?;
    Ok(Json(response))
}

/// Debit bytes from a user.
#[utoipa::path(
    post,
    path = "/api/user/{user_id}/bytes/remove",
    tag = "user",
    params(("user_id" = String, Path, description = "Client-chosen user identifier")),
    request_body = RemoveBytesRequest,
    responses(
        (status = 200, description = "Bytes debited", body = RemoveBytesResponse),
        (status = 400, description = "Invalid amount or insufficient balance")
    )
)]
pub async fn remove_bytes(
    State(state): State<SharedState>,
    Path(user_id): Path<String>,
    Json(payload): Json<RemoveBytesRequest>,
) -> Result<Json<RemoveBytesResponse>, AppError> {
    let response = game_service::remove_bytes(&state, &user_id, payload).await?;
    Ok(Json(response))
}

/// Purchase one level of an upgrade track.
#[utoipa::path(
    post,
    path = "/api/user/{user_id}/upgrade",
    tag = "user",
    params(("user_id" = String, Path, description = "Client-chosen user identifier")),
    request_body = PurchaseUpgradeRequest,
    responses(
        (status = 200, description = "Upgrade applied", body = PurchaseUpgradeResponse),
        (status = 400, description = "Invalid upgrade request")
    )
)]
pub async fn purchase_upgrade(
    State(state): State<SharedState>,
    Path(user_id): Path<String>,
    Json(payload): Json<PurchaseUpgradeRequest>,
) -> Result<Json<PurchaseUpgradeResponse>, AppError> {
    let response = game_service::purchase_upgrade(&state, &user_id, payload).await?;
    Ok(Json(response))
}

/// Public projection of every known user.
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "user",
    responses((status = 200, description = "All users", body = [PublicUser]))
)]
pub async fn list_users(State(state): State<SharedState>) -> Json<Vec<PublicUser>> {
    Json(game_service::list_users(&state).await)
}
