//! Serializable view of a session, produced after every accepted mutation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::move_record::LastMove;
use crate::session::game_session::{GameOutcome, SessionStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceView {
    /// Hex text, since JSON consumers cannot hold a full `u64`.
    pub id: String,
    pub kind: PieceKind,
    pub color: Color,
    pub square: Square,
    pub has_moved: bool,
}

impl From<&Piece> for PieceView {
    fn from(piece: &Piece) -> Self {
        Self {
            id: piece.id.to_string(),
            kind: piece.kind,
            color: piece.color,
            square: piece.square,
            has_moved: piece.has_moved,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastMoveView {
    pub piece: PieceView,
    pub from: Square,
    pub to: Square,
    pub was_two_square_pawn_advance: bool,
}

impl From<&LastMove> for LastMoveView {
    fn from(last: &LastMove) -> Self {
        Self {
            piece: PieceView::from(&last.piece),
            from: last.from,
            to: last.to,
            was_two_square_pawn_advance: last.was_two_square_pawn_advance,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub player_id: String,
    pub username: String,
    pub color: Color,
    pub move_history: Vec<String>,
    pub captured_figures: Vec<PieceView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayersView {
    pub white: PlayerView,
    pub black: PlayerView,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub game_id: String,
    /// Plies played so far.
    pub version: u32,
    pub started_at: DateTime<Utc>,
    pub board: Vec<Vec<Option<PieceView>>>,
    pub current_turn: Color,
    pub status: SessionStatus,
    pub outcome: Option<GameOutcome>,
    pub in_check: bool,
    pub last_move: Option<LastMoveView>,
    pub players: PlayersView,
}

impl GameSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn piece_at(&self, square: Square) -> Option<&PieceView> {
        if !(0..8).contains(&square.row) || !(0..8).contains(&square.col) {
            return None;
        }
        self.board[square.row as usize][square.col as usize].as_ref()
    }

    pub fn player(&self, color: Color) -> &PlayerView {
        match color {
            Color::White => &self.players.white,
            Color::Black => &self.players.black,
        }
    }
}

/// Row-major copy of the board, row 0 first.
pub fn board_view(board: &Board) -> Vec<Vec<Option<PieceView>>> {
    board
        .rows()
        .iter()
        .map(|row| row.iter().map(|cell| cell.as_ref().map(PieceView::from)).collect())
        .collect()
}
