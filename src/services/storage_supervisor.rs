use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::dao::models::GameSnapshotEntity;
use crate::dao::snapshot_store::SnapshotStore;
use crate::state::SharedState;
use crate::state::game::GameState;
use crate::state::reducer::GameAction;

/// Quiet window after the last state change before a snapshot is written.
pub const DEFAULT_SAVE_DEBOUNCE: Duration = Duration::from_millis(300);

/// Load the saved snapshot into the store, if a usable one exists.
///
/// Any failure to load degrades to a fresh start: a missing, malformed,
/// or unreadable snapshot is logged and the store keeps its defaults.
/// Callers should run this to completion before starting
/// [`run_autosave`], so a half-restored state is never written back.
///
/// Returns whether a snapshot was applied.
pub async fn restore(state: &SharedState, store: &dyn SnapshotStore) -> bool {
    match store.load().await {
        Ok(Some(snapshot)) => {
            info!(players = snapshot.players.len(), "restoring saved game state");
            state.dispatch(GameAction::LoadSnapshot(snapshot)).await;
            true
        }
        Ok(None) => {
            info!("no saved game state; starting fresh");
            false
        }
        Err(err) => {
            warn!(error = %err, "failed to load saved game state; starting fresh");
            false
        }
    }
}

/// Persist the store's state whenever it settles after a change.
///
/// Subscribes to the store's transition channel and, after each burst of
/// changes, waits for `debounce` of quiet before serializing the latest
/// state and handing it to the snapshot store. A failed save is logged
/// and otherwise ignored; the next state change is the implicit retry.
///
/// Runs until the subscribed store is dropped.
pub async fn run_autosave(
    mut updates: watch::Receiver<GameState>,
    store: Arc<dyn SnapshotStore>,
    debounce: Duration,
) {
    loop {
        if updates.changed().await.is_err() {
            return;
        }

        // Absorb any further changes until the state has been quiet for
        // the debounce window.
        loop {
            match timeout(debounce, updates.changed()).await {
                Ok(Ok(())) => {}
                Ok(Err(_)) => break,
                Err(_) => break,
            }
        }

        let current = updates.borrow_and_update().clone();
        let snapshot = GameSnapshotEntity::from(&current);
        match store.save(snapshot).await {
            Ok(()) => debug!(players = current.players.len(), "game state persisted"),
            Err(err) => warn!(error = %err, "failed to persist game state"),
        }
    }
}
