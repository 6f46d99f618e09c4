use crate::game_state::chess_types::Square;

/// The eight `(d_row, d_col)` jumps of a knight.
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// Knights jump, so nothing between origin and destination matters.
#[inline]
pub fn knight_can_reach(from: Square, to: Square) -> bool {
    let d_row = (to.row - from.row).abs();
    let d_col = (to.col - from.col).abs();
    matches!((d_row, d_col), (1, 2) | (2, 1))
}
