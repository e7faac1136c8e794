use crate::state::game::Player;

/// Sort players ascending by score for display, lowest score first.
///
/// Ties break on ascending player id, so the resulting order is total and
/// reproducible regardless of the input order. This is id-based stability,
/// not insertion-order stability: re-sorting an already ranked list is a
/// no-op.
pub fn rank_players(mut players: Vec<Player>) -> Vec<Player> {
    players.sort_unstable_by_key(|player| (player.score, player.id));
    players
}
