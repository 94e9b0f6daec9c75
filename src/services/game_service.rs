//! All game operations over the user registry. This module is the only
//! writer of user records.

use validator::Validate;

use crate::{
    dto::{
        bytes::{
            AddBytesRequest, AddBytesResponse, BalanceResponse, PurchaseUpgradeRequest,
            PurchaseUpgradeResponse, RemoveBytesRequest, RemoveBytesResponse,
        },
        stats::StatsResponse,
        user::PublicUser,
    },
    error::ServiceError,
    state::SharedState,
    state::game::{UpgradeKind, UserRecord, now_ms},
};

/// Resolve a user via get-or-create and return the full record.
pub async fn fetch_user(state: &SharedState, id: &str) -> UserRecord {
    let mut data = state.data().write().await;
    data.user_mut(id, now_ms()).clone()
}

/// Balance summary for a user, creating the record on first reference.
pub async fn balance(state: &SharedState, id: &str) -> BalanceResponse {
    let mut data = state.data().write().await;
    let user = data.user_mut(id, now_ms());
    BalanceResponse {
        bytes: user.bytes,
        total_earned: user.total_bytes_earned,
        total_spent: user.total_bytes_spent,
    }
}

/// Credit bytes, scaled by the user's multiplier and floored.
pub async fn add_bytes(
    state: &SharedState,
    id: &str,
    request: AddBytesRequest,
) -> Result<AddBytesResponse, ServiceError> {
    request
        .validate()
        .map_err(|_| ServiceError::InvalidAmount)?;

    let mut data = state.data().write().await;
    let user = data.user_mut(id, now_ms());

    let multiplier = user.upgrades.byte_multiplier;
    let credited = (request.amount as f64 * multiplier).floor() as u64;

    // Saturate near u64::MAX so absurd client amounts cannot wrap the
    // balance or break bytes == earned - spent.
    user.bytes = user.bytes.saturating_add(credited);
    user.total_bytes_earned = user.total_bytes_earned.saturating_add(credited);

    Ok(AddBytesResponse {
        success: true,
        bytes_added: credited,
        new_total: user.bytes,
        multiplier,
    })
}

/// Debit bytes, rejecting the call when the balance cannot cover it.
pub async fn remove_bytes(
    state: &SharedState,
    id: &str,
    request: RemoveBytesRequest,
) -> Result<RemoveBytesResponse, ServiceError> {
    request
        .validate()
        .map_err(|_| ServiceError::InvalidAmount)?;

    let mut data = state.data().write().await;
    let user = data.user_mut(id, now_ms());

    if user.bytes < request.amount {
        return Err(ServiceError::InsufficientBytes);
    }

    user.bytes -= request.amount;
    user.total_bytes_spent = user.total_bytes_spent.saturating_add(request.amount);

    Ok(RemoveBytesResponse {
        success: true,
        bytes_removed: request.amount,
        new_total: user.bytes,
    })
}

/// Purchase one level of an upgrade track at the client-supplied cost.
///
/// The cost is only checked for positivity and affordability; the server
/// does not recompute the cost curves.
pub async fn purchase_upgrade(
    state: &SharedState,
    id: &str,
    request: PurchaseUpgradeRequest,
) -> Result<PurchaseUpgradeResponse, ServiceError> {
    let kind = UpgradeKind::from_wire(&request.upgrade_type)
        .ok_or(ServiceError::InvalidUpgradeType)?;
    request
        .validate()
        .map_err(|_| ServiceError::InvalidAmount)?;

    let mut data = state.data().write().await;
    let user = data.user_mut(id, now_ms());

    if user.bytes < request.cost {
        return Err(ServiceError::InsufficientBytesForUpgrade);
    }

    let new_level = kind.apply(&mut user.upgrades);
    user.bytes -= request.cost;
    user.total_bytes_spent = user.total_bytes_spent.saturating_add(request.cost);

    Ok(PurchaseUpgradeResponse {
        success: true,
        upgrade_applied: kind.wire_name().to_string(),
        new_upgrade_level: new_level,
        bytes_spent: request.cost,
        new_total: user.bytes,
    })
}

/// Public projection of every known user.
pub async fn list_users(state: &SharedState) -> Vec<PublicUser> {
    let data = state.data().read().await;
    data.users.values().map(PublicUser::from).collect()
}

/// Aggregate counters over the whole store.
pub async fn stats(state: &SharedState) -> StatsResponse {
    let data = state.data().read().await;
    StatsResponse {
        total_users: data.users.len(),
        total_bytes: data.users.values().map(|user| user.bytes).sum(),
        total_earned: data
            .users
            .values()
            .map(|user| user.total_bytes_earned)
            .sum(),
        total_spent: data.users.values().map(|user| user.total_bytes_spent).sum(),
        last_save: data.last_save,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::AppConfig, dao::file_store::FileStore, state::AppState, state::game::GameStore,
    };

    fn test_state() -> SharedState {
        AppState::new(
            AppConfig::default(),
            FileStore::new("unused-test-store.json"),
            GameStore::new(0),
        )
    }

    async fn invariant_holds(state: &SharedState, id: &str) {
        let data = state.data().read().await;
        let user = &data.users[id];
        assert_eq!(user.bytes, user.total_bytes_earned - user.total_bytes_spent);
    }

    #[tokio::test]
    async fn fetch_user_is_idempotent() {
        let state = test_state();

        let first = fetch_user(&state, "player-one").await;
        let second = fetch_user(&state, "player-one").await;

        assert_eq!(first.id, second.id);
        assert_eq!(first.created_at, second.created_at);
        assert_eq!(second.bytes, 0);
        assert_eq!(state.data().read().await.users.len(), 1);
    }

    #[tokio::test]
    async fn add_bytes_applies_multiplier_floor() {
        let state = test_state();

        {
            let mut data = state.data().write().await;
            data.user_mut("p", 0).upgrades.byte_multiplier = 1.5;
        }

        let response = add_bytes(&state, "p", AddBytesRequest { amount: 3 })
            .await
            .unwrap();

        // floor(3 × 1.5) = 4
        assert_eq!(response.bytes_added, 4);
        assert_eq!(response.new_total, 4);
        assert!((response.multiplier - 1.5).abs() < 1e-9);
        invariant_holds(&state, "p").await;
    }

    #[tokio::test]
    async fn add_bytes_rejects_zero_amount() {
        let state = test_state();
        let result = add_bytes(&state, "p", AddBytesRequest { amount: 0 }).await;
        assert_eq!(result.unwrap_err(), ServiceError::InvalidAmount);
    }

    #[tokio::test]
    async fn add_bytes_saturates_instead_of_wrapping() {
        let state = test_state();

        add_bytes(&state, "p", AddBytesRequest { amount: u64::MAX })
            .await
            .unwrap();
        let response = add_bytes(&state, "p", AddBytesRequest { amount: u64::MAX })
            .await
            .unwrap();

        // The balance pins at the ceiling rather than wrapping, and the
        // earned counter saturates with it.
        assert_eq!(response.new_total, u64::MAX);
        invariant_holds(&state, "p").await;
    }

    #[tokio::test]
    async fn remove_bytes_never_overdraws() {
        let state = test_state();
        add_bytes(&state, "p", AddBytesRequest { amount: 10 })
            .await
            .unwrap();

        let result = remove_bytes(&state, "p", RemoveBytesRequest { amount: 11 }).await;
        assert_eq!(result.unwrap_err(), ServiceError::InsufficientBytes);

        // Balance untouched by the rejected call.
        let response = remove_bytes(&state, "p", RemoveBytesRequest { amount: 10 })
            .await
            .unwrap();
        assert_eq!(response.bytes_removed, 10);
        assert_eq!(response.new_total, 0);
        invariant_holds(&state, "p").await;
    }

    #[tokio::test]
    async fn purchase_rejects_unknown_track() {
        let state = test_state();
        let result = purchase_upgrade(
            &state,
            "p",
            PurchaseUpgradeRequest {
                upgrade_type: "megaClicker".into(),
                cost: 10,
            },
        )
        .await;
        assert_eq!(result.unwrap_err(), ServiceError::InvalidUpgradeType);
    }

    #[tokio::test]
    async fn new_user_scenario() {
        let state = test_state();
        let id = "player-scenario";

        // Add 10 bytes at multiplier 1.
        let added = add_bytes(&state, id, AddBytesRequest { amount: 10 })
            .await
            .unwrap();
        assert_eq!(added.bytes_added, 10);
        assert_eq!(added.new_total, 10);

        // Auto-collector at cost 25 with only 10 bytes is rejected and
        // leaves state unchanged.
        let rejected = purchase_upgrade(
            &state,
            id,
            PurchaseUpgradeRequest {
                upgrade_type: "autoCollector".into(),
                cost: 25,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(rejected, ServiceError::InsufficientBytesForUpgrade);
        // The upgrade route carries its own rejection text.
        assert_eq!(rejected.to_string(), "Insufficient bytes for upgrade");
        assert_eq!(balance(&state, id).await.bytes, 10);

        // Add 20 more, then the purchase succeeds.
        add_bytes(&state, id, AddBytesRequest { amount: 20 })
            .await
            .unwrap();
        let purchased = purchase_upgrade(
            &state,
            id,
            PurchaseUpgradeRequest {
                upgrade_type: "autoCollector".into(),
                cost: 25,
            },
        )
        .await
        .unwrap();

        assert_eq!(purchased.upgrade_applied, "autoCollector");
        assert_eq!(
            purchased.new_upgrade_level,
            crate::state::game::UpgradeLevel::Count(1)
        );
        assert_eq!(purchased.bytes_spent, 25);
        assert_eq!(purchased.new_total, 5);

        let summary = balance(&state, id).await;
        assert_eq!(summary.bytes, 5);
        assert_eq!(summary.total_earned, 30);
        assert_eq!(summary.total_spent, 25);
        invariant_holds(&state, id).await;
    }

    #[tokio::test]
    async fn stats_aggregate_across_users() {
        let state = test_state();
        add_bytes(&state, "a", AddBytesRequest { amount: 5 })
            .await
            .unwrap();
        add_bytes(&state, "b", AddBytesRequest { amount: 7 })
            .await
            .unwrap();
        remove_bytes(&state, "b", RemoveBytesRequest { amount: 2 })
            .await
            .unwrap();

        let stats = stats(&state).await;
        assert_eq!(stats.total_users, 2);
        assert_eq!(stats.total_bytes, 10);
        assert_eq!(stats.total_earned, 12);
        assert_eq!(stats.total_spent, 2);

        let listed = list_users(&state).await;
        assert_eq!(listed.len(), 2);
        assert!(listed.iter().any(|user| user.id == "a" && user.bytes == 5));
    }
}
