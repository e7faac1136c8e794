//! Seat math shared by the reducer and anything else that reasons about
//! the physical table: dealer rotation and the dense-seat invariant.
//!
//! Seats are numbered clockwise, so the dealer advancing counter-clockwise
//! means moving to the numerically lower seat and wrapping from seat 0 to
//! the highest seat.

use crate::state::game::Player;

/// Next dealer seat counter-clockwise from `current`.
///
/// Returns 0 when there are no seats. `current` values outside
/// `0..total` are folded back into range by the modulo.
#[inline]
pub fn next_dealer_seat(current: usize, total: usize) -> usize {
    if total == 0 {
        return 0;
    }
    (current + total - 1) % total
}

/// Clamp a dealer seat after the seat count changed.
///
/// Returns 0 when no seats remain, otherwise the nearest valid seat.
#[inline]
pub fn clamp_dealer_seat(current: usize, total: usize) -> usize {
    if total == 0 {
        return 0;
    }
    current.min(total - 1)
}

/// Reassign seat indices to `0..n-1`, preserving relative seat order.
///
/// Used after a removal leaves a gap in the seating; the slice itself may
/// be in any order (players are usually stored in rank order).
pub fn reindex_seats(players: &mut [Player]) {
    let mut by_seat: Vec<usize> = (0..players.len()).collect();
    by_seat.sort_unstable_by_key(|&i| players[i].seat_index);
    for (seat, &i) in by_seat.iter().enumerate() {
        players[i].seat_index = seat;
    }
}
