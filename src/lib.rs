//! Score-keeping core for tabletop card games.
//!
//! Holds the roster in seating order, applies score changes through a pure
//! reducer, rotates the dealer counter-clockwise, batches rapid score
//! gestures into single commits, and persists snapshots of durable state
//! across restarts. The presentation layer consumes this crate by reading
//! state reactively and dispatching actions; there is no UI or network
//! surface here.

/// Runtime configuration loading.
pub mod config;
/// Snapshot entities and storage backends.
pub mod dao;
/// Operations, score-commit batching, and persistence supervision.
pub mod services;
/// Canonical game state, the reducer, and derived-order utilities.
pub mod state;

pub use config::AppConfig;
pub use state::game::{GameState, Player, PlayerId};
pub use state::reducer::GameAction;
pub use state::{AppState, SharedState};
