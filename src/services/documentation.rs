use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the ByteForge backend.
#[openapi(
    paths(
        crate::routes::user::get_user,
        crate::routes::user::get_balance,
        crate::routes::user::add_bytes,
        crate::routes::user::remove_bytes,
        crate::routes::user::purchase_upgrade,
        crate::routes::user::list_users,
        crate::routes::stats::get_stats,
        crate::routes::health::healthcheck,
    ),
    components(
        schemas(
            crate::state::game::UserRecord,
            crate::state::game::Upgrades,
            crate::dto::user::PublicUser,
            crate::dto::bytes::AddBytesRequest,
            crate::dto::bytes::AddBytesResponse,
            crate::dto::bytes::RemoveBytesRequest,
            crate::dto::bytes::RemoveBytesResponse,
            crate::dto::bytes::BalanceResponse,
            crate::dto::bytes::PurchaseUpgradeRequest,
            crate::dto::bytes::PurchaseUpgradeResponse,
            crate::dto::stats::StatsResponse,
            crate::dto::health::HealthResponse,
        )
    ),
    tags(
        (name = "user", description = "Per-user currency and upgrade operations"),
        (name = "stats", description = "Aggregate game statistics"),
        (name = "health", description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;
