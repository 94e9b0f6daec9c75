//! Core game data: user records, upgrade tracks, cost curves, and the
//! persisted store layout.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;

/// Increment applied to the byte multiplier per purchase.
pub const MULTIPLIER_STEP: f64 = 0.1;

/// Current wall-clock time as epoch milliseconds.
pub fn now_ms() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}

/// Leveled upgrade counters owned by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Upgrades {
    /// Yield multiplier applied to every byte gain; starts at 1.0.
    pub byte_multiplier: f64,
    /// Passive track worth 0.1 bytes per second per level.
    pub auto_collector: u32,
    /// Passive track worth 0.5 bytes per second per level.
    pub byte_generator: u32,
}

impl Default for Upgrades {
    fn default() -> Self {
        Self {
            byte_multiplier: 1.0,
            auto_collector: 0,
            byte_generator: 0,
        }
    }
}

/// Full per-user game state, persisted and served verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Opaque identifier chosen by the client on first contact.
    pub id: String,
    /// Spendable balance.
    pub bytes: u64,
    /// Lifetime bytes earned; never decreases.
    pub total_bytes_earned: u64,
    /// Lifetime bytes spent; never decreases.
    pub total_bytes_spent: u64,
    /// Epoch milliseconds of the last request touching this user.
    pub last_active: i64,
    /// Purchased upgrade levels.
    pub upgrades: Upgrades,
    /// Epoch milliseconds at creation.
    pub created_at: i64,
}

impl UserRecord {
    /// Fresh record with all counters at their defaults.
    pub fn new(id: impl Into<String>, now_ms: i64) -> Self {
        Self {
            id: id.into(),
            bytes: 0,
            total_bytes_earned: 0,
            total_bytes_spent: 0,
            last_active: now_ms,
            upgrades: Upgrades::default(),
            created_at: now_ms,
        }
    }
}

/// Process-wide store flushed to disk as a single JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStore {
    /// Every known user, keyed by id. Records are never deleted.
    pub users: IndexMap<String, UserRecord>,
    /// Epoch milliseconds of the last successful save.
    pub last_save: i64,
}

impl GameStore {
    /// Empty store stamped with the given creation time.
    pub fn new(now_ms: i64) -> Self {
        Self {
            users: IndexMap::new(),
            last_save: now_ms,
        }
    }

    /// Look up `id`, creating a default record on first reference, and
    /// stamp its `lastActive`.
    pub fn user_mut(&mut self, id: &str, now_ms: i64) -> &mut UserRecord {
        let user = self
            .users
            .entry(id.to_owned())
            .or_insert_with(|| UserRecord::new(id, now_ms));
        user.last_active = now_ms;
        user
    }
}

/// The three purchasable upgrade tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradeKind {
    /// Multiplies every byte gain; +0.1 per purchase.
    ByteMultiplier,
    /// Slow passive income; +1 level per purchase.
    AutoCollector,
    /// Faster passive income; +1 level per purchase.
    ByteGenerator,
}

impl UpgradeKind {
    /// Parse the wire name used in upgrade requests.
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "byteMultiplier" => Some(Self::ByteMultiplier),
            "autoCollector" => Some(Self::AutoCollector),
            "byteGenerator" => Some(Self::ByteGenerator),
            _ => None,
        }
    }

    /// Wire name echoed back in upgrade responses.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::ByteMultiplier => "byteMultiplier",
            Self::AutoCollector => "autoCollector",
            Self::ByteGenerator => "byteGenerator",
        }
    }

    /// Apply one purchase of this track and return the new level.
    pub fn apply(self, upgrades: &mut Upgrades) -> UpgradeLevel {
        match self {
            Self::ByteMultiplier => {
                upgrades.byte_multiplier += MULTIPLIER_STEP;
                UpgradeLevel::Multiplier(upgrades.byte_multiplier)
            }
            Self::AutoCollector => {
                upgrades.auto_collector += 1;
                UpgradeLevel::Count(upgrades.auto_collector)
            }
            Self::ByteGenerator => {
                upgrades.byte_generator += 1;
                UpgradeLevel::Count(upgrades.byte_generator)
            }
        }
    }

    /// Price of the next purchase of this track at the current levels.
    ///
    /// The server never checks these against client-supplied costs; they
    /// exist for clients that want to price purchases honestly.
    pub fn cost(self, upgrades: &Upgrades) -> u64 {
        match self {
            Self::ByteMultiplier => multiplier_cost(upgrades.byte_multiplier),
            Self::AutoCollector => auto_collector_cost(upgrades.auto_collector),
            Self::ByteGenerator => byte_generator_cost(upgrades.byte_generator),
        }
    }
}

/// Level reached after an upgrade purchase. The multiplier track levels
/// are fractional, the counter tracks integral.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum UpgradeLevel {
    /// New multiplier value.
    Multiplier(f64),
    /// New counter value.
    Count(u32),
}

impl<'de> Deserialize<'de> for UpgradeLevel {
    /// Integral JSON numbers are counter levels, fractional ones are
    /// multiplier values.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let number = serde_json::Number::deserialize(deserializer)?;
        if let Some(count) = number.as_u64() {
            return Ok(Self::Count(count as u32));
        }
        Ok(Self::Multiplier(number.as_f64().unwrap_or_default()))
    }
}

/// `floor(10 × 1.5^(level × 10))` where `level` is the multiplier value.
pub fn multiplier_cost(level: f64) -> u64 {
    (10.0 * 1.5_f64.powf(level * 10.0)).floor() as u64
}

/// `floor(25 × 2^level)`.
pub fn auto_collector_cost(level: u32) -> u64 {
    (25.0 * 2.0_f64.powi(level as i32)).floor() as u64
}

/// `floor(50 × 3^level)`.
pub fn byte_generator_cost(level: u32) -> u64 {
    (50.0 * 3.0_f64.powi(level as i32)).floor() as u64
}

/// Passive bytes generated per one-second tick at the given levels:
/// `floor(autoCollector × 0.1 + byteGenerator × 0.5)`.
pub fn passive_yield(upgrades: &Upgrades) -> u64 {
    (f64::from(upgrades.auto_collector) * 0.1 + f64::from(upgrades.byte_generator) * 0.5).floor()
        as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiplier_cost_curve() {
        assert_eq!(multiplier_cost(0.0), 10);
        // First purchase for a fresh user (multiplier 1.0).
        assert_eq!(multiplier_cost(1.0), 576);
    }

    #[test]
    fn auto_collector_cost_curve() {
        assert_eq!(auto_collector_cost(0), 25);
        assert_eq!(auto_collector_cost(1), 50);
        assert_eq!(auto_collector_cost(3), 200);
    }

    #[test]
    fn byte_generator_cost_curve() {
        assert_eq!(byte_generator_cost(0), 50);
        assert_eq!(byte_generator_cost(2), 450);
    }

    #[test]
    fn passive_yield_floors_fractional_rates() {
        let mut upgrades = Upgrades::default();
        assert_eq!(passive_yield(&upgrades), 0);

        // 3 × 0.1 = 0.3 still floors to zero.
        upgrades.auto_collector = 3;
        assert_eq!(passive_yield(&upgrades), 0);

        upgrades.byte_generator = 1;
        assert_eq!(passive_yield(&upgrades), 0);

        // 10 × 0.1 + 2 × 0.5 = 2.0
        upgrades.auto_collector = 10;
        upgrades.byte_generator = 2;
        assert_eq!(passive_yield(&upgrades), 2);
    }

    #[test]
    fn apply_increments_tracks() {
        let mut upgrades = Upgrades::default();

        let level = UpgradeKind::ByteMultiplier.apply(&mut upgrades);
        match level {
            UpgradeLevel::Multiplier(value) => assert!((value - 1.1).abs() < 1e-9),
            other => panic!("unexpected level {other:?}"),
        }

        assert_eq!(
            UpgradeKind::AutoCollector.apply(&mut upgrades),
            UpgradeLevel::Count(1)
        );
        assert_eq!(
            UpgradeKind::ByteGenerator.apply(&mut upgrades),
            UpgradeLevel::Count(1)
        );
    }

    #[test]
    fn wire_names_round_trip() {
        for kind in [
            UpgradeKind::ByteMultiplier,
            UpgradeKind::AutoCollector,
            UpgradeKind::ByteGenerator,
        ] {
            assert_eq!(UpgradeKind::from_wire(kind.wire_name()), Some(kind));
        }
        assert_eq!(UpgradeKind::from_wire("megaClicker"), None);
    }

    #[test]
    fn user_mut_is_get_or_create() {
        let mut store = GameStore::new(0);

        let created_at = {
            let user = store.user_mut("player-abc", 100);
            assert_eq!(user.bytes, 0);
            assert_eq!(user.upgrades, Upgrades::default());
            assert_eq!(user.last_active, 100);
            user.created_at
        };

        // Second reference returns the same record, only refreshing
        // lastActive.
        let user = store.user_mut("player-abc", 200);
        assert_eq!(user.created_at, created_at);
        assert_eq!(user.last_active, 200);
        assert_eq!(store.users.len(), 1);
    }
}
