//! Background autosave of the user registry to the snapshot file.

use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, warn};

use crate::{dao::storage::StorageResult, state::SharedState};

/// Flush the store on a fixed timer, unconditionally, until the process
/// exits. Failures are logged and swallowed; there are no retries beyond
/// the next scheduled tick.
pub async fn run(state: SharedState) {
    let mut ticker = interval(state.config().save_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately; skip it so the bootstrap
    // write is not duplicated.
    ticker.tick().await;

    loop {
        ticker.tick().await;
        match save(&state).await {
            Ok(()) => debug!("autosave complete"),
            Err(err) => warn!(error = %err, "autosave failed"),
        }
    }
}

/// Take a read-consistent snapshot (refreshing `lastSave`) and overwrite
/// the snapshot file with it. Also invoked once on graceful shutdown.
pub async fn save(state: &SharedState) -> StorageResult<()> {
    let snapshot = state.snapshot_for_save().await;
    state.store().save(&snapshot).await
}
