//! Request-rejection outcomes surfaced by sessions and the registry.
//!
//! None of these are fatal: a rejected request leaves the session exactly as
//! it was. Transport layers should forward `code()` rather than `Display`.

use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveError {
    /// The origin square holds no piece (or is off the board).
    EmptySquare,
    /// The piece is not the side to move, or the caller does not own that side.
    WrongTurn,
    /// The destination fails the piece's movement rules.
    IllegalMove,
    /// The move would leave the mover's own king in check.
    SelfCheck,
    CastlingNotAllowed,
    InvalidPromotionChoice,
    GameEnded,
}

impl MoveError {
    pub const fn code(self) -> &'static str {
        match self {
            MoveError::EmptySquare => "empty_square",
            MoveError::WrongTurn => "wrong_turn",
            MoveError::IllegalMove => "illegal_move",
            MoveError::SelfCheck => "self_check",
            MoveError::CastlingNotAllowed => "castling_not_allowed",
            MoveError::InvalidPromotionChoice => "invalid_promotion_choice",
            MoveError::GameEnded => "game_ended",
        }
    }
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::EmptySquare => write!(f, "there is no piece on the origin square"),
            MoveError::WrongTurn => write!(f, "it is not this player's turn"),
            MoveError::IllegalMove => write!(f, "the piece cannot move there"),
            MoveError::SelfCheck => write!(f, "the move would leave the king in check"),
            MoveError::CastlingNotAllowed => write!(f, "castling is not allowed"),
            MoveError::InvalidPromotionChoice => {
                write!(f, "promotion must be to queen, rook, bishop or knight")
            }
            MoveError::GameEnded => write!(f, "the game is over"),
        }
    }
}

impl Error for MoveError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    UnknownSession(String),
    DuplicateSession(String),
    InvalidLobby(String),
    UnknownPlayer(String),
    Move(MoveError),
}

impl SessionError {
    pub fn code(&self) -> &'static str {
        match self {
            SessionError::UnknownSession(_) => "unknown_session",
            SessionError::DuplicateSession(_) => "duplicate_session",
            SessionError::InvalidLobby(_) => "invalid_lobby",
            SessionError::UnknownPlayer(_) => "unknown_player",
            SessionError::Move(err) => err.code(),
        }
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::UnknownSession(id) => write!(f, "no session with id '{id}'"),
            SessionError::DuplicateSession(id) => write!(f, "session '{id}' already exists"),
            SessionError::InvalidLobby(reason) => write!(f, "invalid lobby: {reason}"),
            SessionError::UnknownPlayer(id) => write!(f, "player '{id}' is not seated in this game"),
            SessionError::Move(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SessionError::Move(err) => Some(err),
            _ => None,
        }
    }
}

impl From<MoveError> for SessionError {
    fn from(err: MoveError) -> Self {
        SessionError::Move(err)
    }
}
