use tracing::{debug, info};

use crate::services::pending_scores::PendingScoreQueue;
use crate::state::SharedState;
use crate::state::game::{GameState, PlayerId};
use crate::state::reducer::GameAction;

/// Seat a new player at the next free seat.
pub async fn add_player(state: &SharedState, name: impl Into<String>) -> GameState {
    let next = state
        .dispatch(GameAction::AddPlayer { name: name.into() })
        .await;
    info!(players = next.players.len(), "player added");
    next
}

/// Seat several players at once, in the given seating order.
pub async fn add_players_batch(state: &SharedState, names: Vec<String>) -> GameState {
    let next = state.dispatch(GameAction::AddPlayersBatch { names }).await;
    info!(players = next.players.len(), "players seated");
    next
}

/// Change a player's display name; blank input leaves it unchanged.
pub async fn rename_player(
    state: &SharedState,
    id: PlayerId,
    name: impl Into<String>,
) -> GameState {
    state
        .dispatch(GameAction::RenamePlayer {
            id,
            name: name.into(),
        })
        .await
}

/// Apply a free-form delta to a player's committed score.
pub async fn update_score(state: &SharedState, id: PlayerId, delta: i64) -> GameState {
    debug!(player = %id, delta, "score updated");
    state.dispatch(GameAction::UpdateScore { id, delta }).await
}

/// Overwrite a player's committed score.
pub async fn set_score(state: &SharedState, id: PlayerId, value: i64) -> GameState {
    debug!(player = %id, value, "score set");
    state.dispatch(GameAction::SetScore { id, value }).await
}

/// Record a quick-adjust gesture; the delta commits after the quiet
/// period managed by the queue.
pub async fn quick_adjust(queue: &PendingScoreQueue, id: PlayerId, delta: i64) -> GameState {
    queue.add(id, delta).await
}

/// Remove a player, canceling any commit timer still in flight for them
/// before the state changes, so a stale commit can never fire afterwards.
pub async fn remove_player(
    state: &SharedState,
    pending: &PendingScoreQueue,
    id: PlayerId,
) -> GameState {
    pending.cancel(id);
    let next = state.dispatch(GameAction::RemovePlayer { id }).await;
    info!(player = %id, players = next.players.len(), "player removed");
    next
}

/// Advance the dealer one seat counter-clockwise.
pub async fn advance_dealer(state: &SharedState) -> GameState {
    let next = state.dispatch(GameAction::NextDealer).await;
    debug!(dealer_seat = next.dealer_seat_index, "dealer advanced");
    next
}

/// Zero every score and discard all pending deltas and timers.
pub async fn reset_scores(state: &SharedState, pending: &PendingScoreQueue) -> GameState {
    pending.cancel_all();
    let next = state.dispatch(GameAction::ResetScores).await;
    info!("scores reset");
    next
}

/// Open (or close, with `None`) a player's score-entry panel.
pub async fn expand_player(state: &SharedState, id: Option<PlayerId>) -> GameState {
    state.dispatch(GameAction::ExpandPlayer { id }).await
}

/// Record that the one-time onboarding flow has been completed.
pub async fn complete_onboarding(state: &SharedState) -> GameState {
    state.dispatch(GameAction::MarkOnboardingSeen).await
}

/// Record that the first-run setup flow has been completed.
pub async fn start_game(state: &SharedState) -> GameState {
    state.dispatch(GameAction::StartGame).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use std::time::Duration;
    use tokio::time::sleep;

    #[tokio::test(start_paused = true)]
    async fn removing_a_player_cancels_their_pending_commit() {
        let state = AppState::new();
        let queue = PendingScoreQueue::new(state.clone());
        let game = add_players_batch(&state, vec!["Ann".into(), "Bo".into()]).await;
        let ann = game.players[0].id;
        let bo = game.players[1].id;

        quick_adjust(&queue, ann, 10).await;
        let after = remove_player(&state, &queue, ann).await;
        assert!(after.player(ann).is_none());
        assert!(after.pending_scores.is_empty());

        // Long past the quiet period: no stray commit revives the player
        // or disturbs anyone else.
        sleep(Duration::from_secs(5)).await;
        let settled = state.game().await;
        assert!(settled.player(ann).is_none());
        assert_eq!(settled.player(bo).unwrap().score, 0);
        assert!(settled.pending_scores.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn reset_cancels_every_pending_commit() {
        let state = AppState::new();
        let queue = PendingScoreQueue::new(state.clone());
        let game = add_players_batch(&state, vec!["Ann".into(), "Bo".into()]).await;
        let ann = game.players[0].id;
        let bo = game.players[1].id;

        quick_adjust(&queue, ann, 3).await;
        quick_adjust(&queue, bo, -2).await;
        reset_scores(&state, &queue).await;

        sleep(Duration::from_secs(5)).await;
        let settled = state.game().await;
        assert!(settled.players.iter().all(|p| p.score == 0));
        assert!(settled.pending_scores.is_empty());
    }

    #[tokio::test]
    async fn onboarding_and_start_flags_latch() {
        let state = AppState::new();
        complete_onboarding(&state).await;
        let game = start_game(&state).await;
        assert!(game.has_seen_onboarding);
        assert!(game.is_game_started);
    }
}
