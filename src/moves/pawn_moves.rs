//! Pawn geometry without en passant.
//!
//! En passant depends on the previous ply, so it lives with the other
//! history-dependent rules in `move_generation::special_moves`.

use crate::game_state::board::Board;
use crate::game_state::chess_rules::pawn_start_row;
use crate::game_state::chess_types::*;

pub fn pawn_can_reach(board: &Board, piece: &Piece, from: Square, to: Square) -> bool {
    let direction = piece.color.pawn_direction();
    let d_row = to.row - from.row;
    let d_col = to.col - from.col;

    if d_col == 0 {
        if d_row == direction {
            return board.is_empty(to);
        }
        if d_row == 2 * direction && from.row == pawn_start_row(piece.color) {
            return board.is_empty(from.offset(direction, 0)) && board.is_empty(to);
        }
        return false;
    }

    // Diagonal step only onto an enemy.
    d_row == direction
        && d_col.abs() == 1
        && board
            .get(to)
            .is_some_and(|target| target.color != piece.color)
}
