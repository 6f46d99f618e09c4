//! 8×8 mailbox board.
//!
//! `Board` is pure data: it answers occupancy and bounds queries and lets
//! callers assign cells directly. It knows nothing about move legality;
//! keeping the origin/destination pair consistent is the caller's job.

use serde::{Deserialize, Serialize};

use crate::game_state::chess_rules::{home_row, pawn_start_row, BACK_RANK, BOARD_SIZE};
use crate::game_state::chess_types::*;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub fn empty() -> Self {
        Self {
            squares: [[None; 8]; 8],
        }
    }

    /// Standard starting position: Black on rows 0/1, White on rows 6/7.
    pub fn standard() -> Self {
        let mut board = Self::empty();
        for color in [Color::White, Color::Black] {
            for (col, kind) in BACK_RANK.iter().enumerate() {
                board.place(*kind, color, Square::new(home_row(color), col as i8));
            }
            for col in 0..BOARD_SIZE {
                board.place(PieceKind::Pawn, color, Square::new(pawn_start_row(color), col));
            }
        }
        board
    }

    #[inline]
    pub fn is_in_bounds(&self, square: Square) -> bool {
        (0..BOARD_SIZE).contains(&square.row) && (0..BOARD_SIZE).contains(&square.col)
    }

    /// Piece on `square`, or `None` when empty or off the board.
    #[inline]
    pub fn get(&self, square: Square) -> Option<&Piece> {
        if !self.is_in_bounds(square) {
            return None;
        }
        self.squares[square.row as usize][square.col as usize].as_ref()
    }

    /// Assign a cell. Writes outside the board are ignored.
    #[inline]
    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        if self.is_in_bounds(square) {
            self.squares[square.row as usize][square.col as usize] = piece;
        }
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.get(square).is_none()
    }

    /// Places a fresh, unmoved piece and returns a copy of it.
    pub fn place(&mut self, kind: PieceKind, color: Color, square: Square) -> Piece {
        let piece = Piece::new(kind, color, square);
        self.set(square, Some(piece));
        piece
    }

    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|p| p.kind == PieceKind::King && p.color == color)
            .map(|p| p.square)
    }

    /// All pieces, row by row.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.squares.iter().flatten().flatten()
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = &Piece> {
        self.pieces().filter(move |p| p.color == color)
    }

    /// Rows as stored, row 0 first.
    pub fn rows(&self) -> &[[Option<Piece>; 8]; 8] {
        &self.squares
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn standard_setup_layout() {
        let board = Board::standard();
        assert_eq!(board.pieces().count(), 32);
        assert_eq!(board.find_king(Color::White), Some(Square::new(7, 4)));
        assert_eq!(board.find_king(Color::Black), Some(Square::new(0, 4)));
        let queen = board.get(Square::new(7, 3)).expect("white queen on d1");
        assert_eq!((queen.kind, queen.color), (PieceKind::Queen, Color::White));
        assert!(board.is_empty(Square::new(4, 4)));
    }

    #[test]
    fn piece_ids_are_unique() {
        let board = Board::standard();
        let ids: HashSet<PieceId> = board.pieces().map(|p| p.id).collect();
        assert_eq!(ids.len(), 32);
    }

    #[test]
    fn bounds_and_off_board_access() {
        let mut board = Board::empty();
        assert!(board.is_in_bounds(Square::new(0, 7)));
        assert!(!board.is_in_bounds(Square::new(8, 0)));
        assert!(!board.is_in_bounds(Square::new(0, -1)));
        assert!(board.get(Square::new(-1, 3)).is_none());
        board.set(Square::new(9, 9), None);
        assert_eq!(board, Board::empty());
    }

    #[test]
    fn find_king_missing() {
        assert_eq!(Board::empty().find_king(Color::White), None);
    }
}
