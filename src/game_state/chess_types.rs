//! Core value types shared by the board, the rule predicates and the session.
//!
//! Squares are `(row, col)` pairs. Row 0 is the far rank from White's side
//! (rank 8 in algebraic terms), so White pawns advance towards row 0 and
//! Black pawns towards row 7. Orientation on screen is a display concern.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Side owning a piece or holding the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row step of a forward pawn move for this side.
    #[inline]
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

/// Piece kind (color is carried separately on `Piece`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    #[inline]
    pub const fn is_promotable(self) -> bool {
        matches!(
            self,
            PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight
        )
    }

    /// Upper-case letter used in move notation; pawns have none.
    #[inline]
    pub const fn notation_letter(self) -> Option<char> {
        match self {
            PieceKind::Pawn => None,
            PieceKind::Knight => Some('N'),
            PieceKind::Bishop => Some('B'),
            PieceKind::Rook => Some('R'),
            PieceKind::Queen => Some('Q'),
            PieceKind::King => Some('K'),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Rook => "rook",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PieceKind {
    type Err = String;

    /// Accepts English names in any case and the single letters used in
    /// long algebraic promotion suffixes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pawn" | "p" => Ok(PieceKind::Pawn),
            "knight" | "n" => Ok(PieceKind::Knight),
            "bishop" | "b" => Ok(PieceKind::Bishop),
            "rook" | "r" => Ok(PieceKind::Rook),
            "queen" | "q" => Ok(PieceKind::Queen),
            "king" | "k" => Ok(PieceKind::King),
            other => Err(format!("unknown piece kind: {other}")),
        }
    }
}

/// Board coordinate. Values outside `0..=7` are representable so that
/// offsets can be computed freely; `Board::is_in_bounds` decides validity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(i8, i8)", into = "(i8, i8)")]
pub struct Square {
    pub row: i8,
    pub col: i8,
}

impl Square {
    #[inline]
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    #[inline]
    pub const fn offset(self, d_row: i8, d_col: i8) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }

    /// Iterates all 64 on-board squares, row by row.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8i8).flat_map(|row| (0..8i8).map(move |col| Square::new(row, col)))
    }
}

impl From<(i8, i8)> for Square {
    fn from((row, col): (i8, i8)) -> Self {
        Square::new(row, col)
    }
}

impl From<Square> for (i8, i8) {
    fn from(square: Square) -> Self {
        (square.row, square.col)
    }
}

/// Opaque identity of a piece. Survives moves and promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PieceId(pub u64);

impl PieceId {
    #[inline]
    pub fn random() -> Self {
        PieceId(rand::random::<u64>())
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// A piece standing on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub kind: PieceKind,
    pub color: Color,
    pub square: Square,
    pub has_moved: bool,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color, square: Square) -> Self {
        Self {
            id: PieceId::random(),
            kind,
            color,
            square,
            has_moved: false,
        }
    }

    /// Same identity and position, different kind. Used for promotion.
    #[inline]
    pub fn promoted_to(self, kind: PieceKind) -> Self {
        Self { kind, ..self }
    }
}
