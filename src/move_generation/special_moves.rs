//! Castling, en passant and promotion.
//!
//! These are the rules that need more than piece geometry: castling looks at
//! `has_moved` flags and attacked squares, en passant at the previous ply,
//! promotion at the destination row. `plan_move` is the single entry point
//! that turns a non-castling `(from, to)` pair into a [`PlannedMove`].

use std::fmt;

use crate::game_state::board::Board;
use crate::game_state::chess_rules::{
    home_row, promotion_row, KINGSIDE_ROOK_COL, KING_START_COL, QUEENSIDE_ROOK_COL,
};
use crate::game_state::chess_types::*;
use crate::game_state::move_record::{LastMove, MoveSpecial};
use crate::move_generation::legal_move_apply::PlannedMove;
use crate::move_generation::legal_move_checks::{is_king_in_check, leaves_king_in_check};
use crate::moves::piece_rules::{path_is_clear, pseudo_legal_for};

/// Why a castling attempt was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastlingBlock {
    NotAKing,
    KingMoved,
    KingNotOnStartSquare,
    RowChange,
    RookMissing,
    RookMoved,
    PathOccupied,
    KingInCheck,
    PassesThroughCheck,
}

impl fmt::Display for CastlingBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CastlingBlock::NotAKing => write!(f, "only the king can castle"),
            CastlingBlock::KingMoved => write!(f, "king has already moved"),
            CastlingBlock::KingNotOnStartSquare => write!(f, "king is not on its starting square"),
            CastlingBlock::RowChange => write!(f, "castling stays on the king's row"),
            CastlingBlock::RookMissing => write!(f, "no rook on the castling corner"),
            CastlingBlock::RookMoved => write!(f, "rook has already moved"),
            CastlingBlock::PathOccupied => write!(f, "squares between king and rook are occupied"),
            CastlingBlock::KingInCheck => write!(f, "cannot castle out of check"),
            CastlingBlock::PassesThroughCheck => {
                write!(f, "king would pass through or land on an attacked square")
            }
        }
    }
}

/// A king moving two columns is a castling attempt, whatever else is true.
#[inline]
pub fn is_castling_attempt(board: &Board, piece: &Piece, from: Square, to: Square) -> bool {
    piece.kind == PieceKind::King
        && board.is_in_bounds(from)
        && board.is_in_bounds(to)
        && (to.col - from.col).abs() == 2
}

pub fn validate_castling(board: &Board, from: Square, to: Square) -> Result<PlannedMove, CastlingBlock> {
    let king = *board.get(from).ok_or(CastlingBlock::NotAKing)?;
    if king.kind != PieceKind::King {
        return Err(CastlingBlock::NotAKing);
    }
    if king.has_moved {
        return Err(CastlingBlock::KingMoved);
    }
    if from != Square::new(home_row(king.color), KING_START_COL) {
        return Err(CastlingBlock::KingNotOnStartSquare);
    }
    if to.row != from.row || !board.is_in_bounds(to) {
        return Err(CastlingBlock::RowChange);
    }

    let direction = (to.col - from.col).signum();
    let rook_col = if direction > 0 {
        KINGSIDE_ROOK_COL
    } else {
        QUEENSIDE_ROOK_COL
    };
    let rook_from = Square::new(from.row, rook_col);
    let rook = board
        .get(rook_from)
        .filter(|p| p.kind == PieceKind::Rook && p.color == king.color)
        .ok_or(CastlingBlock::RookMissing)?;
    if rook.has_moved {
        return Err(CastlingBlock::RookMoved);
    }
    if !path_is_clear(board, from, rook_from) {
        return Err(CastlingBlock::PathOccupied);
    }
    if is_king_in_check(board, king.color) {
        return Err(CastlingBlock::KingInCheck);
    }

    // Every square the king crosses, destination included.
    let mut col = from.col + direction;
    loop {
        let step = PlannedMove::plain(from, Square::new(from.row, col));
        if leaves_king_in_check(board, &step, king.color) {
            return Err(CastlingBlock::PassesThroughCheck);
        }
        if col == to.col {
            break;
        }
        col += direction;
    }

    Ok(PlannedMove {
        from,
        to,
        special: MoveSpecial::Castling {
            rook_from,
            rook_to: Square::new(from.row, from.col + direction),
        },
    })
}

/// Square of the pawn an en passant capture from `from` to `to` would remove.
///
/// Only valid against the opponent's immediately preceding double step
/// landing beside the capturing pawn on the target column.
pub fn en_passant_capture(
    board: &Board,
    last_move: Option<&LastMove>,
    piece: &Piece,
    from: Square,
    to: Square,
) -> Option<Square> {
    let last = last_move?;
    if piece.kind != PieceKind::Pawn || !board.is_in_bounds(from) || !board.is_in_bounds(to) {
        return None;
    }
    if to.row - from.row != piece.color.pawn_direction()
        || (to.col - from.col).abs() != 1
        || !board.is_empty(to)
    {
        return None;
    }
    if !last.was_two_square_pawn_advance
        || last.piece.kind != PieceKind::Pawn
        || last.piece.color == piece.color
        || last.to.col != to.col
        || last.to.row != from.row
    {
        return None;
    }
    // The pawn must still be where it landed.
    board
        .get(last.to)
        .filter(|victim| victim.id == last.piece.id)
        .map(|_| last.to)
}

/// Does moving `piece` to `to` put it on its promotion row?
#[inline]
pub fn is_promotion(piece: &Piece, to: Square) -> bool {
    piece.kind == PieceKind::Pawn && to.row == promotion_row(piece.color)
}

/// Classifies a non-castling move, or `None` if it is not pseudo-legal.
///
/// `promotion` is only consulted when the move reaches the promotion row;
/// the caller has already checked that it is a promotable kind.
pub fn plan_move(
    board: &Board,
    last_move: Option<&LastMove>,
    from: Square,
    to: Square,
    promotion: PieceKind,
) -> Option<PlannedMove> {
    let piece = board.get(from)?;

    if pseudo_legal_for(board, piece, from, to) {
        let special = if is_promotion(piece, to) {
            MoveSpecial::Promotion { kind: promotion }
        } else if piece.kind == PieceKind::Pawn && (to.row - from.row).abs() == 2 {
            MoveSpecial::DoubleStep
        } else {
            MoveSpecial::Normal
        };
        return Some(PlannedMove { from, to, special });
    }

    en_passant_capture(board, last_move, piece, from, to).map(|captured_square| PlannedMove {
        from,
        to,
        special: MoveSpecial::EnPassant { captured_square },
    })
}
