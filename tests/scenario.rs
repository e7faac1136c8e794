//! End-to-end flows driven through the public API: seating, scoring,
//! dealer rotation, quick-adjust commits, and a persistence cycle.

use std::sync::Arc;
use std::sync::Once;
use std::time::Duration;

use tokio::time::sleep;

use tally_keeper::dao::snapshot_store::MemorySnapshotStore;
use tally_keeper::services::pending_scores::PendingScoreQueue;
use tally_keeper::services::{game_service, storage_supervisor};
use tally_keeper::{AppState, GameState};

static INIT_LOGGING: Once = Once::new();

fn init_logging() {
    INIT_LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

fn seats(game: &GameState) -> Vec<usize> {
    let mut seats: Vec<usize> = game.players.iter().map(|p| p.seat_index).collect();
    seats.sort_unstable();
    seats
}

#[tokio::test]
async fn a_full_evening_of_score_keeping() {
    init_logging();
    let state = AppState::new();

    let game = game_service::add_players_batch(
        &state,
        vec!["Ann".into(), "Bo".into(), "Cy".into()],
    )
    .await;

    assert!(game.players.iter().all(|p| p.score == 0));
    assert_eq!(seats(&game), vec![0, 1, 2]);

    let ann = game.players.iter().find(|p| p.name == "Ann").unwrap().id;
    let bo = game.players.iter().find(|p| p.name == "Bo").unwrap().id;

    // Bo takes a penalty and moves to the top of the (ascending) board.
    let game = game_service::update_score(&state, bo, -5).await;
    assert_eq!(game.players[0].id, bo);

    // Dealer moves counter-clockwise from seat 0, wrapping to seat 2.
    let game = game_service::advance_dealer(&state).await;
    assert_eq!(game.dealer_seat_index, 2);
    assert_eq!(game.dealer().unwrap().name, "Cy");

    // Ann leaves; seats close up and the dealer seat clamps into range.
    let queue = PendingScoreQueue::new(state.clone());
    let game = game_service::remove_player(&state, &queue, ann).await;
    assert_eq!(seats(&game), vec![0, 1]);
    assert_eq!(game.dealer_seat_index, 1);
}

#[tokio::test(start_paused = true)]
async fn quick_adjust_commits_like_a_single_update() {
    init_logging();
    let state = AppState::new();
    let queue = PendingScoreQueue::new(state.clone());

    let game = game_service::add_player(&state, "Ann").await;
    let ann = game.players[0].id;

    game_service::quick_adjust(&queue, ann, 3).await;
    let game = game_service::quick_adjust(&queue, ann, 2).await;
    assert_eq!(game.preview_score(ann), Some(5));
    assert_eq!(game.player(ann).unwrap().score, 0);

    sleep(Duration::from_millis(1300)).await;

    let game = state.game().await;
    assert_eq!(game.player(ann).unwrap().score, 5);
    assert!(game.pending_scores.is_empty());
}

#[tokio::test(start_paused = true)]
async fn durable_state_survives_a_restart() {
    init_logging();
    let store = MemorySnapshotStore::new();

    // First session: set up the table and let autosave settle.
    {
        let state = AppState::new();
        assert!(!storage_supervisor::restore(&state, &store).await);
        tokio::spawn(storage_supervisor::run_autosave(
            state.subscribe(),
            Arc::new(store.clone()),
            storage_supervisor::DEFAULT_SAVE_DEBOUNCE,
        ));

        game_service::add_players_batch(&state, vec!["Ann".into(), "Bo".into()]).await;
        game_service::complete_onboarding(&state).await;
        let game = game_service::start_game(&state).await;
        let ann = game.players[0].id;
        game_service::update_score(&state, ann, 21).await;
        game_service::expand_player(&state, Some(ann)).await;

        sleep(Duration::from_millis(400)).await;
        assert!(store.snapshot().await.is_some());
    }

    // Second session: everything durable comes back, nothing transient.
    let state = AppState::new();
    assert!(storage_supervisor::restore(&state, &store).await);

    let game = state.game().await;
    assert_eq!(game.players.len(), 2);
    assert_eq!(
        game.players.iter().map(|p| p.score).max(),
        Some(21)
    );
    assert!(game.has_seen_onboarding);
    assert!(game.is_game_started);
    assert!(game.expanded_player_id.is_none());
    assert!(game.pending_scores.is_empty());
}
