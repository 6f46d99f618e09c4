use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::move_record::LastMove;
use crate::move_generation::legal_move_apply::{board_after, PlannedMove};
use crate::move_generation::special_moves::{en_passant_capture, plan_move};
use crate::moves::king_moves::king_neighbours;
use crate::moves::piece_rules::{pseudo_legal_for, squares_between};

#[inline]
pub fn king_square(board: &Board, color: Color) -> Option<Square> {
    board.find_king(color)
}

/// Every `attacker_color` piece that pseudo-legally reaches `square`.
pub fn attackers_to_square(board: &Board, square: Square, attacker_color: Color) -> Vec<(Piece, Square)> {
    board
        .pieces_of(attacker_color)
        .filter(|piece| pseudo_legal_for(board, piece, piece.square, square))
        .map(|piece| (*piece, piece.square))
        .collect()
}

/// Pieces currently giving check to `color`'s king. Empty without a king.
pub fn checking_pieces(board: &Board, color: Color) -> Vec<(Piece, Square)> {
    let Some(king_sq) = king_square(board, color) else {
        return Vec::new();
    };
    attackers_to_square(board, king_sq, color.opposite())
}

#[inline]
pub fn is_king_in_check(board: &Board, color: Color) -> bool {
    !checking_pieces(board, color).is_empty()
}

/// Plays `planned` on a copy of `board` and reports whether `mover`'s king is
/// attacked afterwards. A move that cannot be applied counts as unsafe.
pub fn leaves_king_in_check(board: &Board, planned: &PlannedMove, mover: Color) -> bool {
    match board_after(board, planned) {
        Ok(after) => is_king_in_check(&after, mover),
        Err(_) => true,
    }
}

/// Can the piece on `from` legally go to `to` (castling excluded)?
fn is_safe_move(board: &Board, last_move: Option<&LastMove>, from: Square, to: Square, mover: Color) -> bool {
    plan_move(board, last_move, from, to, PieceKind::Queen)
        .is_some_and(|planned| !leaves_king_in_check(board, &planned, mover))
}

/// `color` is in check and nothing resolves it.
///
/// King steps are tried first. Against a double check nothing else helps.
/// Against a single checker, any piece may capture it or interpose on the
/// line between it and the king; an en passant capture of a checking pawn
/// is tried as well.
pub fn is_checkmate(board: &Board, last_move: Option<&LastMove>, color: Color) -> bool {
    let Some(king_sq) = king_square(board, color) else {
        return false;
    };
    let checkers = attackers_to_square(board, king_sq, color.opposite());
    if checkers.is_empty() {
        return false;
    }

    if king_neighbours(king_sq).any(|to| is_safe_move(board, last_move, king_sq, to, color)) {
        return false;
    }

    if checkers.len() > 1 {
        return true;
    }

    let (checker, checker_sq) = checkers[0];
    let mut targets = squares_between(king_sq, checker_sq);
    if checker.kind == PieceKind::Knight {
        targets.clear();
    }
    targets.push(checker_sq);

    for defender in board.pieces_of(color) {
        if defender.kind == PieceKind::King {
            continue;
        }
        if targets
            .iter()
            .any(|&to| is_safe_move(board, last_move, defender.square, to, color))
        {
            return false;
        }
    }

    if checker.kind == PieceKind::Pawn {
        for defender in board.pieces_of(color).filter(|p| p.kind == PieceKind::Pawn) {
            let behind = checker_sq.offset(color.pawn_direction(), 0);
            if en_passant_capture(board, last_move, defender, defender.square, behind).is_some()
                && is_safe_move(board, last_move, defender.square, behind, color)
            {
                return false;
            }
        }
    }

    true
}

/// `color` is not in check and has no legal move at all.
pub fn is_stalemate(board: &Board, last_move: Option<&LastMove>, color: Color) -> bool {
    if is_king_in_check(board, color) {
        return false;
    }
    !has_any_legal_move(board, last_move, color)
}

/// Exhaustive scan over every own piece and every destination.
pub fn has_any_legal_move(board: &Board, last_move: Option<&LastMove>, color: Color) -> bool {
    board.pieces_of(color).any(|piece| {
        Square::all().any(|to| is_safe_move(board, last_move, piece.square, to, color))
    })
}
