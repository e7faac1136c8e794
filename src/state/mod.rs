pub mod game;
pub mod ranking;
pub mod reducer;
pub mod seating;

use std::sync::Arc;

use tokio::sync::{RwLock, watch};
use tokio_stream::wrappers::WatchStream;

use crate::state::game::GameState;
use crate::state::reducer::GameAction;

/// Shared handle to the store, cloned cheaply across tasks.
pub type SharedState = Arc<AppState>;

/// Central store owning the canonical [`GameState`].
///
/// Actions are applied through the pure reducer under a write lock, and
/// every transition is published on a watch channel so observers (the
/// presentation layer, the autosave driver) react to state they did not
/// produce themselves. The store itself performs no I/O.
pub struct AppState {
    game: RwLock<GameState>,
    changes: watch::Sender<GameState>,
}

impl AppState {
    /// Construct a store with default (empty) state, wrapped in an [`Arc`]
    /// so it can be cloned cheaply.
    pub fn new() -> SharedState {
        Self::with_initial(GameState::default())
    }

    /// Construct a store seeded with the given state.
    pub fn with_initial(initial: GameState) -> SharedState {
        let (changes, _rx) = watch::channel(initial.clone());
        Arc::new(Self {
            game: RwLock::new(initial),
            changes,
        })
    }

    /// Apply an action and publish the resulting state to subscribers.
    ///
    /// Callers are expected to be sequential (a single UI thread of
    /// control plus serialized timer callbacks); the write lock keeps any
    /// stragglers from interleaving mid-transition.
    pub async fn dispatch(&self, action: GameAction) -> GameState {
        let mut guard = self.game.write().await;
        let next = reducer::apply(guard.clone(), action);
        *guard = next.clone();
        let _ = self.changes.send(next.clone());
        next
    }

    /// Clone of the current state.
    pub async fn game(&self) -> GameState {
        self.game.read().await.clone()
    }

    /// Subscribe to state transitions.
    pub fn subscribe(&self) -> watch::Receiver<GameState> {
        self.changes.subscribe()
    }

    /// State transitions as a stream, for reactive consumers.
    pub fn updates(&self) -> WatchStream<GameState> {
        WatchStream::new(self.changes.subscribe())
    }
}
