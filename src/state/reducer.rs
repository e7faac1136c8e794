use std::mem;

use uuid::Uuid;

use crate::dao::models::GameSnapshotEntity;
use crate::state::game::{GameState, Player, PlayerId};
use crate::state::ranking::rank_players;
use crate::state::seating::{clamp_dealer_seat, next_dealer_seat, reindex_seats};

/// Maximum display-name length after trimming; longer input is truncated.
pub const MAX_NAME_LEN: usize = 30;

/// Discrete state transitions accepted by [`apply`].
#[derive(Debug, Clone, PartialEq)]
pub enum GameAction {
    /// Seat a new player at the next free seat.
    AddPlayer {
        /// Requested display name; blank falls back to `"Player {n}"`.
        name: String,
    },
    /// Seat several players at once, in the given order.
    AddPlayersBatch {
        /// Requested display names, one player per entry.
        names: Vec<String>,
    },
    /// Remove a player and close the seating gap they leave behind.
    RemovePlayer {
        /// Player to remove.
        id: PlayerId,
    },
    /// Change a player's display name.
    RenamePlayer {
        /// Player to rename.
        id: PlayerId,
        /// New name; blank input leaves the current name in place.
        name: String,
    },
    /// Add a delta to a player's committed score.
    UpdateScore {
        /// Player whose score changes.
        id: PlayerId,
        /// Signed amount added to the score.
        delta: i64,
    },
    /// Overwrite a player's committed score.
    SetScore {
        /// Player whose score changes.
        id: PlayerId,
        /// New committed score.
        value: i64,
    },
    /// Accumulate an uncommitted delta for a player.
    AddPendingScore {
        /// Player the delta belongs to.
        id: PlayerId,
        /// Signed amount added to the pending total.
        delta: i64,
    },
    /// Fold a player's pending delta into their committed score.
    CommitPendingScore {
        /// Player whose pending delta commits.
        id: PlayerId,
    },
    /// Advance the dealer one seat counter-clockwise.
    NextDealer,
    /// Zero every score and discard all pending deltas.
    ResetScores,
    /// Open (or close, with `None`) a player's score-entry panel.
    ExpandPlayer {
        /// Player whose panel opens, or `None` to close it.
        id: Option<PlayerId>,
    },
    /// Replace the state wholesale with a persisted snapshot.
    LoadSnapshot(GameSnapshotEntity),
    /// Record that the one-time onboarding flow has been completed.
    MarkOnboardingSeen,
    /// Record that the first-run setup flow has been completed.
    StartGame,
}

/// Apply an action to the state, producing the next state.
///
/// Pure and total: every action yields a well-defined next state, and an
/// action referencing a player id that does not exist leaves the state
/// unchanged rather than failing.
pub fn apply(mut state: GameState, action: GameAction) -> GameState {
    match action {
        GameAction::AddPlayer { name } => {
            seat_player(&mut state, name);
            re_rank(&mut state);
        }
        GameAction::AddPlayersBatch { names } => {
            for name in names {
                seat_player(&mut state, name);
            }
            re_rank(&mut state);
        }
        GameAction::RemovePlayer { id } => {
            let before = state.players.len();
            state.players.retain(|player| player.id != id);
            if state.players.len() != before {
                reindex_seats(&mut state.players);
                state.dealer_seat_index =
                    clamp_dealer_seat(state.dealer_seat_index, state.players.len());
                if state.expanded_player_id == Some(id) {
                    state.expanded_player_id = None;
                }
                state.pending_scores.shift_remove(&id);
                re_rank(&mut state);
            }
        }
        GameAction::RenamePlayer { id, name } => {
            if let Some(clean) = sanitize_name(&name) {
                if let Some(player) = player_mut(&mut state, id) {
                    player.name = clean;
                }
            }
        }
        GameAction::UpdateScore { id, delta } => {
            if let Some(player) = player_mut(&mut state, id) {
                player.score += delta;
                state.expanded_player_id = None;
                re_rank(&mut state);
            }
        }
        GameAction::SetScore { id, value } => {
            if let Some(player) = player_mut(&mut state, id) {
                player.score = value;
                state.expanded_player_id = None;
                re_rank(&mut state);
            }
        }
        GameAction::AddPendingScore { id, delta } => {
            if state.player(id).is_some() {
                let total = state.pending_delta(id) + delta;
                if total == 0 {
                    state.pending_scores.shift_remove(&id);
                } else {
                    state.pending_scores.insert(id, total);
                }
            }
        }
        GameAction::CommitPendingScore { id } => {
            if let Some(delta) = state.pending_scores.shift_remove(&id) {
                if delta != 0 {
                    if let Some(player) = player_mut(&mut state, id) {
                        player.score += delta;
                        re_rank(&mut state);
                    }
                }
            }
        }
        GameAction::NextDealer => {
            state.dealer_seat_index =
                next_dealer_seat(state.dealer_seat_index, state.players.len());
        }
        GameAction::ResetScores => {
            for player in &mut state.players {
                player.score = 0;
            }
            state.pending_scores.clear();
            state.expanded_player_id = None;
            re_rank(&mut state);
        }
        GameAction::ExpandPlayer { id } => {
            state.expanded_player_id = id;
        }
        GameAction::LoadSnapshot(snapshot) => {
            state = GameState::from(snapshot);
        }
        GameAction::MarkOnboardingSeen => {
            state.has_seen_onboarding = true;
        }
        GameAction::StartGame => {
            state.is_game_started = true;
        }
    }

    state
}

fn seat_player(state: &mut GameState, name: String) {
    let seat_index = state.players.len();
    let name =
        sanitize_name(&name).unwrap_or_else(|| format!("Player {}", seat_index + 1));
    state.players.push(Player {
        id: Uuid::new_v4(),
        name,
        score: 0,
        seat_index,
    });
}

fn player_mut(state: &mut GameState, id: PlayerId) -> Option<&mut Player> {
    state.players.iter_mut().find(|player| player.id == id)
}

fn re_rank(state: &mut GameState) {
    state.players = rank_players(mem::take(&mut state.players));
}

/// Trim a requested name, returning `None` for blank input. Names longer
/// than [`MAX_NAME_LEN`] characters are truncated on a char boundary.
fn sanitize_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(MAX_NAME_LEN).collect())
}
