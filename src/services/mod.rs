/// Roster, scoring, and dealer operations consumed by the presentation layer.
pub mod game_service;
/// Debounced accumulation of quick-adjust score gestures.
pub mod pending_scores;
/// Snapshot restore on startup and debounced autosave.
pub mod storage_supervisor;
