use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Aggregate counters over every known user, served by `/api/stats`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    /// Number of distinct users.
    pub total_users: usize,
    /// Sum of all spendable balances.
    pub total_bytes: u64,
    /// Sum of all lifetime earnings.
    pub total_earned: u64,
    /// Sum of all lifetime spending.
    pub total_spent: u64,
    /// Epoch milliseconds of the store's last save.
    pub last_save: i64,
}
