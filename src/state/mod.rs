//! Shared application state threaded through every handler.

pub mod game;

use std::{sync::Arc, time::Instant};

use tokio::sync::RwLock;

use crate::{
    config::AppConfig,
    dao::file_store::FileStore,
    state::game::{GameStore, now_ms},
};

/// Cheaply cloneable handle to the central application state.
pub type SharedState = Arc<AppState>;

/// Central application state: the user registry, its durable store, and
/// process-level metadata.
///
/// The store sits behind one `RwLock`; every mutation runs to completion
/// under the write guard, which keeps get-or-create atomic and gives the
/// autosave task a read-consistent snapshot.
pub struct AppState {
    config: AppConfig,
    store: FileStore,
    data: RwLock<GameStore>,
    started_at: Instant,
}

impl AppState {
    /// Wrap the loaded store into an [`Arc`] so it can be cloned cheaply.
    pub fn new(config: AppConfig, store: FileStore, data: GameStore) -> SharedState {
        Arc::new(Self {
            config,
            store,
            data: RwLock::new(data),
            started_at: Instant::now(),
        })
    }

    /// Runtime configuration resolved at startup.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Durable snapshot store.
    pub fn store(&self) -> &FileStore {
        &self.store
    }

    /// Registry of user records guarded by a read-write lock.
    pub fn data(&self) -> &RwLock<GameStore> {
        &self.data
    }

    /// Seconds elapsed since the process started.
    pub fn uptime_secs(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }

    /// Clone the store for saving, refreshing its `lastSave` stamp.
    pub async fn snapshot_for_save(&self) -> GameStore {
        let mut guard = self.data.write().await;
        guard.last_save = now_ms();
        guard.clone()
    }
}
