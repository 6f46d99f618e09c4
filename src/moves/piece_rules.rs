//! Pseudo-legal move predicate, dispatched by piece kind.
//!
//! A move is pseudo-legal when it respects the piece's geometry and path
//! obstruction. Whether it exposes the mover's king is decided later by
//! `move_generation::legal_move_checks`. Capturing one's own piece is
//! rejected here once, before any per-kind predicate runs.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::moves::bishop_moves::bishop_can_reach;
use crate::moves::king_moves::king_can_reach;
use crate::moves::knight_moves::knight_can_reach;
use crate::moves::pawn_moves::pawn_can_reach;
use crate::moves::queen_moves::queen_can_reach;
use crate::moves::rook_moves::rook_can_reach;

/// Does the piece standing on `from` pseudo-legally reach `to`?
///
/// Returns `false` for an empty origin, an off-board destination, a null
/// move, or a destination held by a piece of the mover's color. En passant
/// and castling are not covered.
pub fn pseudo_legal(board: &Board, from: Square, to: Square) -> bool {
    let Some(piece) = board.get(from) else {
        return false;
    };
    pseudo_legal_for(board, piece, from, to)
}

/// Same as [`pseudo_legal`] for a piece that is not necessarily on `from`
/// in `board` (the caller vouches for it).
pub fn pseudo_legal_for(board: &Board, piece: &Piece, from: Square, to: Square) -> bool {
    if from == to || !board.is_in_bounds(from) || !board.is_in_bounds(to) {
        return false;
    }
    if board.get(to).is_some_and(|target| target.color == piece.color) {
        return false;
    }

    match piece.kind {
        PieceKind::Pawn => pawn_can_reach(board, piece, from, to),
        PieceKind::Knight => knight_can_reach(from, to),
        PieceKind::Bishop => bishop_can_reach(board, from, to),
        PieceKind::Rook => rook_can_reach(board, from, to),
        PieceKind::Queen => queen_can_reach(board, from, to),
        PieceKind::King => king_can_reach(from, to),
    }
}

/// Squares strictly between `from` and `to` along a rank, file or diagonal.
/// Empty when the two squares are not aligned or are adjacent.
pub fn squares_between(from: Square, to: Square) -> Vec<Square> {
    let d_row = to.row - from.row;
    let d_col = to.col - from.col;
    let aligned = d_row == 0 || d_col == 0 || d_row.abs() == d_col.abs();
    if !aligned || (d_row == 0 && d_col == 0) {
        return Vec::new();
    }

    let step = (d_row.signum(), d_col.signum());
    let mut out = Vec::new();
    let mut current = from.offset(step.0, step.1);
    while current != to {
        out.push(current);
        current = current.offset(step.0, step.1);
    }
    out
}

/// Every square strictly between `from` and `to` is empty.
#[inline]
pub fn path_is_clear(board: &Board, from: Square, to: Square) -> bool {
    squares_between(from, to)
        .into_iter()
        .all(|square| board.is_empty(square))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn own_piece_on_destination_is_rejected_for_every_kind() {
        let board = Board::standard();
        // Knight b1 onto own pawn d2, queen d1 onto own pawn d2, king e1 onto d1.
        assert!(!pseudo_legal(&board, Square::new(7, 1), Square::new(6, 3)));
        assert!(!pseudo_legal(&board, Square::new(7, 3), Square::new(6, 3)));
        assert!(!pseudo_legal(&board, Square::new(7, 4), Square::new(7, 3)));
    }

    #[test]
    fn opening_moves_from_start() {
        let board = Board::standard();
        assert!(pseudo_legal(&board, Square::new(7, 6), Square::new(5, 5)));
        assert!(pseudo_legal(&board, Square::new(6, 4), Square::new(4, 4)));
        assert!(!pseudo_legal(&board, Square::new(7, 2), Square::new(5, 4)));
    }

    #[test]
    fn empty_origin_and_off_board_destination() {
        let board = Board::standard();
        assert!(!pseudo_legal(&board, Square::new(4, 4), Square::new(3, 4)));
        assert!(!pseudo_legal(&board, Square::new(7, 6), Square::new(9, 7)));
    }

    #[test]
    fn squares_between_lines() {
        assert_eq!(
            squares_between(Square::new(7, 4), Square::new(7, 7)),
            vec![Square::new(7, 5), Square::new(7, 6)]
        );
        assert_eq!(
            squares_between(Square::new(0, 0), Square::new(3, 3)),
            vec![Square::new(1, 1), Square::new(2, 2)]
        );
        assert!(squares_between(Square::new(0, 0), Square::new(1, 2)).is_empty());
        assert!(squares_between(Square::new(0, 0), Square::new(1, 1)).is_empty());
    }
}
