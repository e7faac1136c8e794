mod file;
mod memory;

use futures::future::BoxFuture;

use crate::dao::models::GameSnapshotEntity;
use crate::dao::storage::StorageResult;

pub use self::file::FileSnapshotStore;
pub use self::memory::MemorySnapshotStore;

/// Abstraction over the persistence layer for game snapshots.
///
/// `load` resolves to `None` when no usable snapshot exists, which callers
/// treat the same as a fresh start. `save` replaces the stored snapshot
/// wholesale.
pub trait SnapshotStore: Send + Sync {
    /// Fetch the most recently saved snapshot, if a usable one exists.
    fn load(&self) -> BoxFuture<'static, StorageResult<Option<GameSnapshotEntity>>>;
    /// Persist a snapshot, replacing whatever was stored before.
    fn save(&self, snapshot: GameSnapshotEntity) -> BoxFuture<'static, StorageResult<()>>;
}
