use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use futures::future::BoxFuture;
use tokio::sync::Mutex;

use crate::dao::models::GameSnapshotEntity;
use crate::dao::storage::{StorageError, StorageResult};

use super::SnapshotStore;

/// In-memory snapshot store for tests and embedders without a filesystem.
///
/// Cloning yields a handle to the same slot, so a test can keep one handle
/// for inspection while the application owns the other.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotStore {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    slot: Mutex<Option<GameSnapshotEntity>>,
    fail_saves: AtomicBool,
    saves: AtomicUsize,
}

impl MemorySnapshotStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inspect the currently stored snapshot.
    pub async fn snapshot(&self) -> Option<GameSnapshotEntity> {
        self.inner.slot.lock().await.clone()
    }

    /// Make subsequent saves fail, to exercise failure handling.
    pub fn fail_saves(&self, fail: bool) {
        self.inner.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Number of snapshots successfully saved so far.
    pub fn save_count(&self) -> usize {
        self.inner.saves.load(Ordering::SeqCst)
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self) -> BoxFuture<'static, StorageResult<Option<GameSnapshotEntity>>> {
        let inner = Arc::clone(&self.inner);
        Box::pin(async move { Ok(inner.slot.lock().await.clone()) })
    }

    fn save(&self, snapshot: GameSnapshotEntity) -> BoxFuture<'static, StorageResult<()>> {
        let inner = Arc::clone(&self.inner);
        Box::pin(async move {
            if inner.fail_saves.load(Ordering::SeqCst) {
                return Err(StorageError::unavailable(
                    "memory store rejected the save".into(),
                    io::Error::other("induced failure"),
                ));
            }
            *inner.slot.lock().await = Some(snapshot);
            inner.saves.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    }
}
