use std::path::PathBuf;

use tokio::fs;
use tracing::{info, warn};

use crate::{
    dao::storage::{StorageError, StorageResult},
    state::game::{GameStore, now_ms},
};

/// Durable snapshot store over a single JSON file.
///
/// Every save is a full overwrite of the file; there are no partial or
/// append writes and no retries.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store handle over `path` without touching the filesystem.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the snapshot file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Open the snapshot, establishing the file when it does not exist.
    ///
    /// An absent or unreadable file yields a fresh empty store which is
    /// written out immediately; the write failure, like all save
    /// failures, is logged and ignored.
    pub async fn open(path: impl Into<PathBuf>) -> (Self, GameStore) {
        let store = Self::new(path);

        match store.load().await {
            Ok(Some(data)) => {
                info!(
                    path = %store.path.display(),
                    users = data.users.len(),
                    "loaded existing game data"
                );
                (store, data)
            }
            Ok(None) => {
                info!(path = %store.path.display(), "no existing data found, starting fresh");
                let data = GameStore::new(now_ms());
                if let Err(err) = store.save(&data).await {
                    warn!(error = %err, "failed to establish data file");
                }
                (store, data)
            }
            Err(err) => {
                warn!(
                    path = %store.path.display(),
                    error = %err,
                    "existing data unreadable, starting fresh"
                );
                let data = GameStore::new(now_ms());
                if let Err(save_err) = store.save(&data).await {
                    warn!(error = %save_err, "failed to establish data file");
                }
                (store, data)
            }
        }
    }

    /// Read and parse the snapshot; `None` when the file does not exist.
    pub async fn load(&self) -> StorageResult<Option<GameStore>> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    source: err,
                });
            }
        };

        let data = serde_json::from_slice(&bytes).map_err(|source| StorageError::Codec {
            path: self.path.clone(),
            source,
        })?;
        Ok(Some(data))
    }

    /// Overwrite the snapshot file with the given store.
    pub async fn save(&self, data: &GameStore) -> StorageResult<()> {
        let payload =
            serde_json::to_vec_pretty(data).map_err(|source| StorageError::Codec {
                path: self.path.clone(),
                source,
            })?;

        fs::write(&self.path, payload)
            .await
            .map_err(|source| StorageError::Io {
                path: self.path.clone(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::game::UserRecord;

    fn scratch_path(name: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("byteforge-{name}-{}.json", std::process::id()));
        path
    }

    #[tokio::test]
    async fn load_missing_file_is_none() {
        let store = FileStore::new(scratch_path("missing"));
        let _ = fs::remove_file(store.path()).await;
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_then_load_round_trips_every_field() {
        let store = FileStore::new(scratch_path("roundtrip"));

        let mut data = GameStore::new(1_700_000_000_000);
        let mut user = UserRecord::new("player-42", 1_700_000_000_001);
        user.bytes = 30;
        user.total_bytes_earned = 55;
        user.total_bytes_spent = 25;
        user.upgrades.byte_multiplier = 1.2;
        user.upgrades.auto_collector = 1;
        data.users.insert(user.id.clone(), user);

        store.save(&data).await.unwrap();
        let reloaded = store.load().await.unwrap().unwrap();
        assert_eq!(reloaded, data);

        let _ = fs::remove_file(store.path()).await;
    }

    #[tokio::test]
    async fn open_establishes_missing_file() {
        let path = scratch_path("establish");
        let _ = fs::remove_file(&path).await;

        let (store, data) = FileStore::open(&path).await;
        assert!(data.users.is_empty());

        // The fresh store was written out immediately.
        let reloaded = store.load().await.unwrap().unwrap();
        assert_eq!(reloaded, data);

        let _ = fs::remove_file(store.path()).await;
    }
}
