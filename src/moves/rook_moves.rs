use crate::game_state::board::Board;
use crate::game_state::chess_types::Square;
use crate::moves::piece_rules::path_is_clear;

#[inline]
pub fn rook_can_reach(board: &Board, from: Square, to: Square) -> bool {
    (from.row == to.row || from.col == to.col) && path_is_clear(board, from, to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::{Color, PieceKind};

    #[test]
    fn rook_slides_along_rank_and_file() {
        let mut board = Board::empty();
        let a1 = Square::new(7, 0);
        board.place(PieceKind::Rook, Color::White, a1);
        assert!(rook_can_reach(&board, a1, Square::new(0, 0)));
        assert!(rook_can_reach(&board, a1, Square::new(7, 7)));
        assert!(!rook_can_reach(&board, a1, Square::new(6, 1)));
    }

    #[test]
    fn rook_blocked_by_piece_in_between() {
        let mut board = Board::empty();
        let a1 = Square::new(7, 0);
        board.place(PieceKind::Rook, Color::White, a1);
        board.place(PieceKind::Pawn, Color::Black, Square::new(4, 0));
        assert!(rook_can_reach(&board, a1, Square::new(4, 0)));
        assert!(!rook_can_reach(&board, a1, Square::new(3, 0)));
    }
}
