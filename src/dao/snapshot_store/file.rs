use std::io::ErrorKind;
use std::path::PathBuf;

use futures::future::BoxFuture;
use tokio::fs;
use tracing::warn;

use crate::dao::models::{GameSnapshotEntity, SNAPSHOT_VERSION};
use crate::dao::storage::{StorageError, StorageResult};

use super::SnapshotStore;

/// Snapshot store backed by a single JSON document on the local filesystem.
///
/// Writes go through a sibling temp file followed by a rename, so a crash
/// mid-save leaves the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    /// Create a store persisting to the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing snapshot document.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self) -> BoxFuture<'static, StorageResult<Option<GameSnapshotEntity>>> {
        let path = self.path.clone();
        Box::pin(async move {
            let contents = match fs::read(&path).await {
                Ok(contents) => contents,
                Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
                Err(err) => {
                    return Err(StorageError::unavailable(
                        format!("failed to read snapshot at {}", path.display()),
                        err,
                    ));
                }
            };

            match serde_json::from_slice::<GameSnapshotEntity>(&contents) {
                Ok(snapshot) if snapshot.version == SNAPSHOT_VERSION => Ok(Some(snapshot)),
                Ok(snapshot) => {
                    warn!(
                        path = %path.display(),
                        version = snapshot.version,
                        "snapshot schema version unsupported; ignoring saved state"
                    );
                    Ok(None)
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "snapshot unreadable; ignoring saved state"
                    );
                    Ok(None)
                }
            }
        })
    }

    fn save(&self, snapshot: GameSnapshotEntity) -> BoxFuture<'static, StorageResult<()>> {
        let path = self.path.clone();
        Box::pin(async move {
            let payload = serde_json::to_vec_pretty(&snapshot).map_err(|err| {
                StorageError::serialization("failed to encode snapshot".into(), err)
            })?;

            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).await.map_err(|err| {
                        StorageError::unavailable(
                            format!("failed to create snapshot directory {}", parent.display()),
                            err,
                        )
                    })?;
                }
            }

            let staging = path.with_extension("tmp");
            fs::write(&staging, &payload).await.map_err(|err| {
                StorageError::unavailable(
                    format!("failed to write snapshot at {}", staging.display()),
                    err,
                )
            })?;
            fs::rename(&staging, &path).await.map_err(|err| {
                StorageError::unavailable(
                    format!("failed to replace snapshot at {}", path.display()),
                    err,
                )
            })?;

            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::models::PlayerEntity;
    use std::time::SystemTime;
    use uuid::Uuid;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join("tally-keeper-tests")
            .join(format!("{}-{}.json", name, Uuid::new_v4()))
    }

    fn sample_snapshot() -> GameSnapshotEntity {
        GameSnapshotEntity {
            version: SNAPSHOT_VERSION,
            players: vec![PlayerEntity {
                id: Uuid::new_v4(),
                name: "Ann".into(),
                score: 7,
                seat_index: 0,
            }],
            dealer_seat_index: 0,
            has_seen_onboarding: true,
            is_game_started: false,
            updated_at: SystemTime::now(),
        }
    }

    #[tokio::test]
    async fn missing_file_loads_as_none() {
        let store = FileSnapshotStore::new(scratch_path("missing"));
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn snapshot_survives_save_and_load() {
        let store = FileSnapshotStore::new(scratch_path("round-trip"));
        let snapshot = sample_snapshot();

        store.save(snapshot.clone()).await.unwrap();
        let loaded = store.load().await.unwrap().unwrap();
        assert_eq!(loaded, snapshot);
    }

    #[tokio::test]
    async fn malformed_document_loads_as_none() {
        let path = scratch_path("malformed");
        tokio::fs::create_dir_all(path.parent().unwrap())
            .await
            .unwrap();
        tokio::fs::write(&path, b"{ not json").await.unwrap();

        let store = FileSnapshotStore::new(path);
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unsupported_version_loads_as_none() {
        let path = scratch_path("versioned");
        let mut snapshot = sample_snapshot();
        snapshot.version = SNAPSHOT_VERSION + 1;

        let store = FileSnapshotStore::new(path);
        store.save(snapshot).await.unwrap();
        assert!(store.load().await.unwrap().is_none());
    }
}
