use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use uuid::Uuid;

/// Schema version written into every persisted snapshot.
///
/// Snapshots carrying a different version are treated as absent so the
/// application falls back to defaults instead of misreading old data.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Representation of a player stored in persistence and shared across layers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerEntity {
    /// Stable identifier for the player.
    pub id: Uuid,
    /// Display name chosen for the player.
    pub name: String,
    /// Committed score for the player.
    pub score: i64,
    /// Fixed position in the physical seating order.
    pub seat_index: usize,
}

/// Aggregate snapshot entity persisted by the storage layer.
///
/// Only durable game data is represented here: transient UI state such as
/// the expanded score panel or uncommitted pending deltas has no field, so
/// it can never leak into a saved snapshot. A snapshot without a `players`
/// field fails to deserialize and is handled upstream as "no saved state".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameSnapshotEntity {
    /// Schema version of this snapshot.
    #[serde(default = "default_version")]
    pub version: u32,
    /// Participating players with their committed scores and seats.
    pub players: Vec<PlayerEntity>,
    /// Seat index currently holding the dealer role.
    #[serde(default)]
    pub dealer_seat_index: usize,
    /// Whether the one-time onboarding flow has been completed.
    #[serde(default)]
    pub has_seen_onboarding: bool,
    /// Whether the first-run setup flow has been completed.
    #[serde(default)]
    pub is_game_started: bool,
    /// Last time the snapshot was written.
    #[serde(default = "SystemTime::now")]
    pub updated_at: SystemTime,
}

fn default_version() -> u32 {
    SNAPSHOT_VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_default_on_deserialization() {
        let raw = r#"{"players": []}"#;
        let snapshot: GameSnapshotEntity = serde_json::from_str(raw).unwrap();
        assert_eq!(snapshot.version, SNAPSHOT_VERSION);
        assert!(snapshot.players.is_empty());
        assert_eq!(snapshot.dealer_seat_index, 0);
        assert!(!snapshot.has_seen_onboarding);
        assert!(!snapshot.is_game_started);
    }

    #[test]
    fn missing_players_field_is_rejected() {
        let raw = r#"{"dealer_seat_index": 2}"#;
        assert!(serde_json::from_str::<GameSnapshotEntity>(raw).is_err());
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let snapshot = GameSnapshotEntity {
            version: SNAPSHOT_VERSION,
            players: vec![PlayerEntity {
                id: Uuid::new_v4(),
                name: "Ann".into(),
                score: -12,
                seat_index: 0,
            }],
            dealer_seat_index: 0,
            has_seen_onboarding: true,
            is_game_started: true,
            updated_at: SystemTime::now(),
        };

        let encoded = serde_json::to_string(&snapshot).unwrap();
        let decoded: GameSnapshotEntity = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, snapshot);
    }
}
