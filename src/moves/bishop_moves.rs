use crate::game_state::board::Board;
use crate::game_state::chess_types::Square;
use crate::moves::piece_rules::path_is_clear;

#[inline]
pub fn bishop_can_reach(board: &Board, from: Square, to: Square) -> bool {
    (to.row - from.row).abs() == (to.col - from.col).abs() && path_is_clear(board, from, to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_types::{Color, PieceKind};

    #[test]
    fn bishop_blocker_stops_diagonal() {
        let mut board = Board::empty();
        let c1 = Square::new(7, 2);
        board.place(PieceKind::Bishop, Color::White, c1);
        assert!(bishop_can_reach(&board, c1, Square::new(2, 7)));
        board.place(PieceKind::Pawn, Color::White, Square::new(5, 4));
        assert!(!bishop_can_reach(&board, c1, Square::new(4, 5)));
        assert!(bishop_can_reach(&board, c1, Square::new(6, 3)));
    }

    #[test]
    fn bishop_rejects_orthogonal_moves() {
        let board = Board::empty();
        assert!(!bishop_can_reach(&board, Square::new(7, 2), Square::new(7, 5)));
    }
}
