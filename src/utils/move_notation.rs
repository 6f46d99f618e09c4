//! Long algebraic text for committed moves (`e2-e4`, `Ng1xf3`, `O-O`, `e7-e8=Q+`).

use crate::game_state::chess_types::*;
use crate::game_state::move_record::MoveSpecial;
use crate::utils::algebraic::square_label;

/// Check annotation appended to a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckSuffix {
    #[default]
    None,
    Check,
    Checkmate,
}

impl CheckSuffix {
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            CheckSuffix::None => "",
            CheckSuffix::Check => "+",
            CheckSuffix::Checkmate => "#",
        }
    }
}

/// `kind` is the moving piece before the move.
pub fn describe_move(
    kind: PieceKind,
    from: Square,
    to: Square,
    is_capture: bool,
    special: MoveSpecial,
    suffix: CheckSuffix,
) -> String {
    let mut out = match special {
        MoveSpecial::Castling { .. } if to.col > from.col => "O-O".to_owned(),
        MoveSpecial::Castling { .. } => "O-O-O".to_owned(),
        _ => {
            let mut text = String::with_capacity(12);
            if let Some(letter) = kind.notation_letter() {
                text.push(letter);
            }
            text.push_str(&square_label(from));
            text.push(if is_capture { 'x' } else { '-' });
            text.push_str(&square_label(to));
            match special {
                MoveSpecial::Promotion { kind } => {
                    text.push('=');
                    text.push(kind.notation_letter().unwrap_or('Q'));
                }
                MoveSpecial::EnPassant { .. } => text.push_str(" e.p."),
                _ => {}
            }
            text
        }
    };
    out.push_str(suffix.as_str());
    out
}
