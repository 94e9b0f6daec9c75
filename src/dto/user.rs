use serde::Serialize;
use utoipa::ToSchema;

use crate::state::game::{Upgrades, UserRecord};

/// Public projection of a user record served by `/api/users`.
///
/// Drops `createdAt` and renames the lifetime counters, matching the
/// listing shape rather than the full record.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    /// User identifier.
    pub id: String,
    /// Spendable balance.
    pub bytes: u64,
    /// Lifetime bytes earned.
    pub total_earned: u64,
    /// Lifetime bytes spent.
    pub total_spent: u64,
    /// Epoch milliseconds of the last request touching this user.
    pub last_active: i64,
    /// Purchased upgrade levels.
    pub upgrades: Upgrades,
}

impl From<&UserRecord> for PublicUser {
    fn from(user: &UserRecord) -> Self {
        Self {
            id: user.id.clone(),
            bytes: user.bytes,
            total_earned: user.total_bytes_earned,
            total_spent: user.total_bytes_spent,
            last_active: user.last_active,
            upgrades: user.upgrades.clone(),
        }
    }
}
