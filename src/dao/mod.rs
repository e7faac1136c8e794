/// Persisted snapshot entity definitions.
pub mod models;
/// Snapshot storage backends and the store abstraction.
pub mod snapshot_store;
/// Storage error taxonomy shared by every backend.
pub mod storage;
