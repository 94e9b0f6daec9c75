//! Terminal autopilot driving the ByteForge API: it assigns itself a
//! random session id, collects bytes every second, requests passive
//! income when its generators produce any, and buys the cheapest upgrade
//! it can afford.

use std::{env, time::Duration};

use anyhow::Context;
use rand::{Rng, distr::Alphanumeric};
use reqwest::Client;
use tokio::time::interval;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use byteforge_back::{
    dto::bytes::{
        AddBytesRequest, AddBytesResponse, PurchaseUpgradeRequest, PurchaseUpgradeResponse,
    },
    state::game::{UpgradeKind, UserRecord, passive_yield},
};

/// Environment variable pointing the autopilot at a server.
const BASE_URL_ENV: &str = "BYTEFORGE_URL";
/// Default server address when no override is present.
const DEFAULT_BASE_URL: &str = "http://localhost:3000";
/// Length of the random session id suffix.
const SESSION_SUFFIX_LEN: usize = 9;

/// Client lifecycle, advancing once the first user fetch succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Uninitialized,
    Loading,
    Ready,
}

/// Driver holding the HTTP client and the locally cached user snapshot.
struct Autopilot {
    http: Client,
    base_url: String,
    user_id: String,
    phase: Phase,
    user: Option<UserRecord>,
}

impl Autopilot {
    fn new(base_url: String) -> Self {
        let suffix: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(SESSION_SUFFIX_LEN)
            .map(char::from)
            .collect();

        Self {
            http: Client::new(),
            base_url,
            user_id: format!("player-{}", suffix.to_lowercase()),
            phase: Phase::Uninitialized,
            user: None,
        }
    }

    fn user_url(&self, suffix: &str) -> String {
        format!("{}/api/user/{}{}", self.base_url, self.user_id, suffix)
    }

    /// Load the user record (created server-side on first contact) and
    /// enter the ready phase.
    async fn init(&mut self) -> anyhow::Result<()> {
        self.phase = Phase::Loading;

        let user = self
            .http
            .get(self.user_url(""))
            .send()
            .await
            .context("fetching user")?
            .error_for_status()
            .context("user fetch rejected")?
            .json::<UserRecord>()
            .await
            .context("decoding user")?;

        info!(user = %user.id, "session ready");
        self.user = Some(user);
        self.phase = Phase::Ready;
        Ok(())
    }

    /// Request a byte credit and fold the result into the cached snapshot.
    async fn add_bytes(&mut self, amount: u64) -> anyhow::Result<()> {
        let response = self
            .http
            .post(self.user_url("/bytes/add"))
            .json(&AddBytesRequest { amount })
            .send()
            .await
            .context("sending add-bytes")?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "add-bytes rejected");
            return Ok(());
        }

        let body: AddBytesResponse = response.json().await.context("decoding add-bytes")?;
        if let Some(user) = self.user.as_mut() {
            user.bytes = body.new_total;
            user.total_bytes_earned += body.bytes_added;
        }
        Ok(())
    }

    /// Buy the cheapest affordable upgrade, if any.
    ///
    /// The purchase is gated locally against the cached cost and balance;
    /// the server re-validates independently.
    async fn try_purchase(&mut self) -> anyhow::Result<()> {
        let Some(snapshot) = self.user.clone() else {
            return Ok(());
        };

        let pick = [
            UpgradeKind::ByteMultiplier,
            UpgradeKind::AutoCollector,
            UpgradeKind::ByteGenerator,
        ]
        .into_iter()
        .map(|kind| (kind, kind.cost(&snapshot.upgrades)))
        .filter(|(_, cost)| *cost <= snapshot.bytes)
        .min_by_key(|(_, cost)| *cost);

        let Some((kind, cost)) = pick else {
            return Ok(());
        };

        let response = self
            .http
            .post(self.user_url("/upgrade"))
            .json(&PurchaseUpgradeRequest {
                upgrade_type: kind.wire_name().to_string(),
                cost,
            })
            .send()
            .await
            .context("sending upgrade purchase")?;

        if !response.status().is_success() {
            warn!(status = %response.status(), track = kind.wire_name(), "purchase rejected");
            return Ok(());
        }

        let body: PurchaseUpgradeResponse =
            response.json().await.context("decoding purchase")?;
        if let Some(user) = self.user.as_mut() {
            user.bytes = body.new_total;
            user.total_bytes_spent += body.bytes_spent;
            kind.apply(&mut user.upgrades);
        }

        info!(track = kind.wire_name(), cost, "upgrade purchased");
        Ok(())
    }

    /// One game tick: manual collect, passive income, then shopping.
    async fn tick(&mut self) -> anyhow::Result<()> {
        self.add_bytes(1).await?;

        let passive = self
            .user
            .as_ref()
            .map(|user| passive_yield(&user.upgrades))
            .unwrap_or(0);
        if passive > 0 {
            self.add_bytes(passive).await?;
        }

        self.try_purchase().await?;
        self.render();
        Ok(())
    }

    /// Redraw the status line from the cached snapshot.
    fn render(&self) {
        let Some(user) = self.user.as_ref() else {
            return;
        };

        let rate = f64::from(user.upgrades.auto_collector) * 0.1
            + f64::from(user.upgrades.byte_generator) * 0.5;
        info!(
            bytes = %format_bytes(user.bytes),
            earned = %format_bytes(user.total_bytes_earned),
            spent = %format_bytes(user.total_bytes_spent),
            multiplier = format!("{:.1}x", user.upgrades.byte_multiplier),
            rate = format!("{rate:.1}/s"),
            "status"
        );
    }
}

/// Abbreviate large byte counts for the status line.
fn format_bytes(value: u64) -> String {
    match value {
        1_000_000_000.. => format!("{:.1}B", value as f64 / 1e9),
        1_000_000.. => format!("{:.1}M", value as f64 / 1e6),
        1_000.. => format!("{:.1}K", value as f64 / 1e3),
        _ => value.to_string(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let base_url = env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.into());
    let mut autopilot = Autopilot::new(base_url);
    autopilot.init().await?;

    let mut ticker = interval(Duration::from_secs(1));
    loop {
        ticker.tick().await;
        if autopilot.phase != Phase::Ready {
            continue;
        }
        if let Err(err) = autopilot.tick().await {
            warn!(error = %err, "tick failed");
        }
    }
}

/// Configure tracing for the autopilot's status output.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_bytes_abbreviates() {
        assert_eq!(format_bytes(999), "999");
        assert_eq!(format_bytes(1_500), "1.5K");
        assert_eq!(format_bytes(2_500_000), "2.5M");
        assert_eq!(format_bytes(3_000_000_000), "3.0B");
    }
}
