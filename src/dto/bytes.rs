use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::state::game::UpgradeLevel;

/// Body of `POST /api/user/{userId}/bytes/add`.
#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub struct AddBytesRequest {
    /// Bytes to credit before the multiplier is applied.
    #[validate(range(min = 1, message = "Invalid amount"))]
    pub amount: u64,
}

/// Result of a successful add-bytes call.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddBytesResponse {
    /// Always true on the success path.
    pub success: bool,
    /// Bytes actually credited after the multiplier and floor.
    pub bytes_added: u64,
    /// Balance after the credit.
    pub new_total: u64,
    /// Multiplier that was applied.
    pub multiplier: f64,
}

/// Body of `POST /api/user/{userId}/bytes/remove`.
#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub struct RemoveBytesRequest {
    /// Bytes to debit.
    #[validate(range(min = 1, message = "Invalid amount"))]
    pub amount: u64,
}

/// Result of a successful remove-bytes call.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RemoveBytesResponse {
    /// Always true on the success path.
    pub success: bool,
    /// Bytes debited.
    pub bytes_removed: u64,
    /// Balance after the debit.
    pub new_total: u64,
}

/// Balance summary served by `GET /api/user/{userId}/bytes`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BalanceResponse {
    /// Spendable balance.
    pub bytes: u64,
    /// Lifetime bytes earned.
    pub total_earned: u64,
    /// Lifetime bytes spent.
    pub total_spent: u64,
}

/// Body of `POST /api/user/{userId}/upgrade`.
///
/// The cost is client-computed and only checked for positivity and
/// affordability, a trust boundary inherited from the original service.
#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseUpgradeRequest {
    /// Wire name of the upgrade track to purchase.
    pub upgrade_type: String,
    /// Price the client computed for this purchase.
    #[validate(range(min = 1, message = "Invalid amount"))]
    pub cost: u64,
}

/// Result of a successful upgrade purchase.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseUpgradeResponse {
    /// Always true on the success path.
    pub success: bool,
    /// Wire name of the track that was upgraded.
    pub upgrade_applied: String,
    /// Level reached on that track.
    #[schema(value_type = f64)]
    pub new_upgrade_level: UpgradeLevel,
    /// Bytes debited for the purchase.
    pub bytes_spent: u64,
    /// Balance after the purchase.
    pub new_total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_amount_fails_validation() {
        let request = AddBytesRequest { amount: 0 };
        assert!(request.validate().is_err());

        let request = AddBytesRequest { amount: 1 };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn zero_cost_fails_validation() {
        let request = PurchaseUpgradeRequest {
            upgrade_type: "autoCollector".into(),
            cost: 0,
        };
        assert!(request.validate().is_err());
    }
}
