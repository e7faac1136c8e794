use indexmap::IndexMap;
use std::time::SystemTime;
use uuid::Uuid;

use crate::dao::models::{GameSnapshotEntity, PlayerEntity, SNAPSHOT_VERSION};
use crate::state::ranking::rank_players;

/// Stable identifier for a player, assigned at creation and never reused.
pub type PlayerId = Uuid;

/// Player info tracked during a game session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Stable identifier for the player.
    pub id: PlayerId,
    /// Display name chosen for the player.
    pub name: String,
    /// Committed score for the player.
    pub score: i64,
    /// Fixed position in the physical seating order, used for dealer
    /// rotation and independent of score rank.
    pub seat_index: usize,
}

/// Aggregated state for the running score sheet.
///
/// `players` is always materialized in display order: ascending score with
/// id as tie-break. `expanded_player_id` and `pending_scores` are transient
/// UI state and are never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    /// Participating players, kept in rank order.
    pub players: Vec<Player>,
    /// Seat index currently holding the dealer role; 0 when no players.
    pub dealer_seat_index: usize,
    /// Player whose score-entry panel is open, if any.
    pub expanded_player_id: Option<PlayerId>,
    /// Accumulated, not-yet-committed score deltas per player.
    pub pending_scores: IndexMap<PlayerId, i64>,
    /// Whether the one-time onboarding flow has been completed.
    pub has_seen_onboarding: bool,
    /// Whether the first-run setup flow has been completed.
    pub is_game_started: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            players: Vec::new(),
            dealer_seat_index: 0,
            expanded_player_id: None,
            pending_scores: IndexMap::new(),
            has_seen_onboarding: false,
            is_game_started: false,
        }
    }
}

impl GameState {
    /// Look up a player by id.
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|player| player.id == id)
    }

    /// The player whose seat currently holds the dealer role.
    pub fn dealer(&self) -> Option<&Player> {
        self.players
            .iter()
            .find(|player| player.seat_index == self.dealer_seat_index)
    }

    /// Whether the given player currently holds the dealer role.
    pub fn is_dealer(&self, id: PlayerId) -> bool {
        self.player(id)
            .is_some_and(|player| player.seat_index == self.dealer_seat_index)
    }

    /// Uncommitted delta accumulated for a player; 0 when none is pending.
    pub fn pending_delta(&self, id: PlayerId) -> i64 {
        self.pending_scores.get(&id).copied().unwrap_or(0)
    }

    /// Committed score plus any pending delta, the value shown while quick
    /// adjustments are still accumulating.
    pub fn preview_score(&self, id: PlayerId) -> Option<i64> {
        self.player(id)
            .map(|player| player.score + self.pending_delta(id))
    }
}

impl From<PlayerEntity> for Player {
    fn from(value: PlayerEntity) -> Self {
        Self {
            id: value.id,
            name: value.name,
            score: value.score,
            seat_index: value.seat_index,
        }
    }
}

impl From<Player> for PlayerEntity {
    fn from(value: Player) -> Self {
        Self {
            id: value.id,
            name: value.name,
            score: value.score,
            seat_index: value.seat_index,
        }
    }
}

impl From<GameSnapshotEntity> for GameState {
    fn from(value: GameSnapshotEntity) -> Self {
        let players: Vec<Player> = value.players.into_iter().map(Into::into).collect();
        Self {
            players: rank_players(players),
            dealer_seat_index: value.dealer_seat_index,
            expanded_player_id: None,
            pending_scores: IndexMap::new(),
            has_seen_onboarding: value.has_seen_onboarding,
            is_game_started: value.is_game_started,
        }
    }
}

impl From<&GameState> for GameSnapshotEntity {
    fn from(value: &GameState) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            players: value.players.iter().cloned().map(Into::into).collect(),
            dealer_seat_index: value.dealer_seat_index,
            has_seen_onboarding: value.has_seen_onboarding,
            is_game_started: value.is_game_started,
            updated_at: SystemTime::now(),
        }
    }
}
