use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::debug;

use crate::state::SharedState;
use crate::state::game::{GameState, PlayerId};
use crate::state::reducer::GameAction;

/// Quiet period after the last quick-adjust gesture before the
/// accumulated delta is committed.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(1200);

/// Batches rapid quick-adjust gestures into one committed score change.
///
/// Each gesture is dispatched immediately as a pending delta so the UI
/// shows the running total, while a per-player single-shot timer commits
/// the accumulated amount once the player stops tapping. This keeps the
/// list from re-ranking on every tap.
///
/// The timer registry is owned by the queue instance, so separate stores
/// (one per test, say) never share timers. Dropping the queue aborts
/// everything still in flight.
pub struct PendingScoreQueue {
    state: SharedState,
    quiet_period: Duration,
    timers: Arc<DashMap<PlayerId, JoinHandle<()>>>,
}

impl PendingScoreQueue {
    /// Create a queue committing after [`DEFAULT_QUIET_PERIOD`].
    pub fn new(state: SharedState) -> Self {
        Self::with_quiet_period(state, DEFAULT_QUIET_PERIOD)
    }

    /// Create a queue with a custom quiet period.
    pub fn with_quiet_period(state: SharedState, quiet_period: Duration) -> Self {
        Self {
            state,
            quiet_period,
            timers: Arc::new(DashMap::new()),
        }
    }

    /// Record a quick-adjust gesture for a player.
    ///
    /// The delta is visible in `pending_scores` right away; the commit
    /// timer restarts, so a burst of gestures commits exactly once after
    /// the quiet period. Gestures for different players run independent
    /// timers.
    pub async fn add(&self, id: PlayerId, delta: i64) -> GameState {
        if let Some((_, handle)) = self.timers.remove(&id) {
            handle.abort();
        }

        let next = self
            .state
            .dispatch(GameAction::AddPendingScore { id, delta })
            .await;

        let state = Arc::clone(&self.state);
        let timers = Arc::clone(&self.timers);
        let quiet_period = self.quiet_period;
        let handle = tokio::spawn(async move {
            sleep(quiet_period).await;
            timers.remove(&id);
            debug!(player = %id, "committing pending score after quiet period");
            state.dispatch(GameAction::CommitPendingScore { id }).await;
        });
        self.timers.insert(id, handle);

        next
    }

    /// Abort the in-flight commit timer for a player, if any.
    ///
    /// Must be called when a player is removed, so a stale timer cannot
    /// fire a commit for someone who no longer exists.
    pub fn cancel(&self, id: PlayerId) {
        if let Some((_, handle)) = self.timers.remove(&id) {
            handle.abort();
        }
    }

    /// Abort every in-flight commit timer.
    pub fn cancel_all(&self) {
        self.timers.retain(|_, handle| {
            handle.abort();
            false
        });
    }
}

impl Drop for PendingScoreQueue {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
