//! Board mutation for a fully classified move.
//!
//! The same routine backs both the committed move and the hypothetical one
//! used for self-check detection, so a simulation always reproduces exactly
//! what a commit would do (including the en passant removal and the castling
//! rook hop). Simulations run on a clone; the live board is never touched.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::move_record::MoveSpecial;

/// A move whose side effects are fully known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedMove {
    pub from: Square,
    pub to: Square,
    pub special: MoveSpecial,
}

impl PlannedMove {
    /// Plain relocation (with capture of whatever sits on `to`).
    #[inline]
    pub const fn plain(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            special: MoveSpecial::Normal,
        }
    }
}

/// Result of applying a `PlannedMove`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedMove {
    /// The moving piece as it stood before the move.
    pub before: Piece,
    /// The moving piece as it stands now (promoted if applicable).
    pub after: Piece,
    pub captured: Option<Piece>,
}

pub fn apply_planned_move(board: &mut Board, planned: &PlannedMove) -> Result<AppliedMove, String> {
    let before = *board
        .get(planned.from)
        .ok_or_else(|| format!("No piece on from-square {:?}", planned.from))?;

    // Resolve everything that can fail before the first write.
    let rook = match planned.special {
        MoveSpecial::Castling { rook_from, .. } => Some(
            *board
                .get(rook_from)
                .ok_or_else(|| format!("No rook on castling square {rook_from:?}"))?,
        ),
        _ => None,
    };

    let captured = match planned.special {
        MoveSpecial::EnPassant { captured_square } => {
            let victim = board.get(captured_square).copied();
            board.set(captured_square, None);
            victim
        }
        _ => board.get(planned.to).copied(),
    };

    let mut after = before;
    after.square = planned.to;
    after.has_moved = true;
    if let MoveSpecial::Promotion { kind } = planned.special {
        after = after.promoted_to(kind);
    }

    board.set(planned.from, None);
    board.set(planned.to, Some(after));

    if let (Some(mut rook), MoveSpecial::Castling { rook_from, rook_to }) = (rook, planned.special) {
        board.set(rook_from, None);
        rook.square = rook_to;
        rook.has_moved = true;
        board.set(rook_to, Some(rook));
    }

    Ok(AppliedMove {
        before,
        after,
        captured,
    })
}

/// Applies `planned` to a copy of `board` and returns the copy.
pub fn board_after(board: &Board, planned: &PlannedMove) -> Result<Board, String> {
    let mut copy = board.clone();
    apply_planned_move(&mut copy, planned)?;
    Ok(copy)
}
