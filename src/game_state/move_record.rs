use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::game_state::chess_types::*;

/// Minimal memory of the previous ply, enough to validate en passant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastMove {
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
    pub was_two_square_pawn_advance: bool,
}

/// What kind of mutation a committed move performed beyond moving one piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MoveSpecial {
    Normal,
    DoubleStep,
    EnPassant { captured_square: Square },
    Castling { rook_from: Square, rook_to: Square },
    Promotion { kind: PieceKind },
}

/// One committed move, kept per player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// 1-based half-move index within the game.
    pub ply: u32,
    pub piece_id: PieceId,
    pub color: Color,
    /// Kind of the piece before the move (a promoting pawn stays `Pawn` here).
    pub kind: PieceKind,
    pub from: Square,
    pub to: Square,
    pub captured: Option<Piece>,
    pub special: MoveSpecial,
    pub notation: String,
    pub played_at: DateTime<Utc>,
}
