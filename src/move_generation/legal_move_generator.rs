//! Legal destination enumeration.
//!
//! Runs the same gates the session pipeline runs (pseudo-legality, en
//! passant, castling, self-check) over every square of the board.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::move_record::LastMove;
use crate::move_generation::legal_move_apply::PlannedMove;
use crate::move_generation::legal_move_checks::leaves_king_in_check;
use crate::move_generation::special_moves::{is_castling_attempt, plan_move, validate_castling};

/// Fully legal move from `from` to `to`, if there is one.
///
/// Promotions are planned with `promotion` as the new kind.
pub fn legal_plan(
    board: &Board,
    last_move: Option<&LastMove>,
    from: Square,
    to: Square,
    promotion: PieceKind,
) -> Option<PlannedMove> {
    let piece = board.get(from)?;
    if is_castling_attempt(board, piece, from, to) {
        return validate_castling(board, from, to).ok();
    }
    plan_move(board, last_move, from, to, promotion)
        .filter(|planned| !leaves_king_in_check(board, planned, piece.color))
}

/// Every square the piece on `from` may legally move to, row by row.
/// Empty when `from` holds no piece.
pub fn legal_destinations(board: &Board, last_move: Option<&LastMove>, from: Square) -> Vec<Square> {
    Square::all()
        .filter(|&to| legal_plan(board, last_move, from, to, PieceKind::Queen).is_some())
        .collect()
}

/// All legal moves for `color`. Promotions appear once, as a queen.
pub fn legal_moves(board: &Board, last_move: Option<&LastMove>, color: Color) -> Vec<PlannedMove> {
    let mut out = Vec::with_capacity(64);
    for piece in board.pieces_of(color) {
        for to in Square::all() {
            if let Some(planned) = legal_plan(board, last_move, piece.square, to, PieceKind::Queen) {
                out.push(planned);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::move_record::MoveSpecial;

    #[test]
    fn twenty_moves_from_start() {
        let board = Board::standard();
        assert_eq!(legal_moves(&board, None, Color::White).len(), 20);
        assert_eq!(legal_moves(&board, None, Color::Black).len(), 20);
    }

    #[test]
    fn knight_destinations_from_start() {
        let board = Board::standard();
        assert_eq!(
            legal_destinations(&board, None, Square::new(7, 1)),
            vec![Square::new(5, 0), Square::new(5, 2)]
        );
        assert!(legal_destinations(&board, None, Square::new(4, 4)).is_empty());
    }

    #[test]
    fn pinned_piece_has_no_destinations() {
        let mut board = Board::empty();
        board.place(PieceKind::King, Color::White, Square::new(7, 4));
        board.place(PieceKind::Knight, Color::White, Square::new(6, 4));
        board.place(PieceKind::Rook, Color::Black, Square::new(0, 4));
        board.place(PieceKind::King, Color::Black, Square::new(0, 0));
        assert!(legal_destinations(&board, None, Square::new(6, 4)).is_empty());
    }

    #[test]
    fn castling_destinations_included() {
        let mut board = Board::empty();
        board.place(PieceKind::King, Color::White, Square::new(7, 4));
        board.place(PieceKind::Rook, Color::White, Square::new(7, 7));
        board.place(PieceKind::King, Color::Black, Square::new(0, 4));
        let king_moves = legal_destinations(&board, None, Square::new(7, 4));
        assert!(king_moves.contains(&Square::new(7, 6)));
        assert!(!king_moves.contains(&Square::new(7, 2)));

        let castle = legal_plan(&board, None, Square::new(7, 4), Square::new(7, 6), PieceKind::Queen)
            .expect("kingside castling available");
        assert!(matches!(castle.special, MoveSpecial::Castling { .. }));
    }
}
