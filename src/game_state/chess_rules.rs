//! Canonical chess-rule constants for the row/column board layout.

use crate::game_state::chess_types::{Color, PieceKind};

/// Board edge length.
pub const BOARD_SIZE: i8 = 8;

/// Back-rank order from column 0 to column 7.
pub const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Column the king starts on, the only one castling is allowed from.
pub const KING_START_COL: i8 = 4;
/// Column of the queenside rook.
pub const QUEENSIDE_ROOK_COL: i8 = 0;
/// Column of the kingside rook.
pub const KINGSIDE_ROOK_COL: i8 = 7;

/// Row holding a side's major pieces at the start.
#[inline]
pub const fn home_row(color: Color) -> i8 {
    match color {
        Color::White => 7,
        Color::Black => 0,
    }
}

/// Row a side's pawns start on (the only row a double step is allowed from).
#[inline]
pub const fn pawn_start_row(color: Color) -> i8 {
    match color {
        Color::White => 6,
        Color::Black => 1,
    }
}

/// Row on which a side's pawn promotes.
#[inline]
pub const fn promotion_row(color: Color) -> i8 {
    match color {
        Color::White => 0,
        Color::Black => 7,
    }
}
