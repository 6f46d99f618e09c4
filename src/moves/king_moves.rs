//! Single-step king geometry.
//!
//! Castling (a two-column king move) is not handled here; the session routes
//! it to the special-move validator before any piece predicate runs.

use crate::game_state::chess_types::Square;

#[inline]
pub fn king_can_reach(from: Square, to: Square) -> bool {
    let d_row = (to.row - from.row).abs();
    let d_col = (to.col - from.col).abs();
    d_row <= 1 && d_col <= 1 && (d_row, d_col) != (0, 0)
}

/// Neighbouring squares, possibly off the board.
pub fn king_neighbours(square: Square) -> impl Iterator<Item = Square> {
    (-1i8..=1)
        .flat_map(|d_row| (-1i8..=1).map(move |d_col| (d_row, d_col)))
        .filter(|offset| *offset != (0, 0))
        .map(move |(d_row, d_col)| square.offset(d_row, d_col))
}
