//! One game between two seated players.
//!
//! `GameSession::apply_move` is the only way the board changes. Every gate
//! (turn, piece rules, castling, en passant, self-check, promotion choice)
//! runs before the first write, so a rejected move leaves the session
//! exactly as it was. After a commit the position is evaluated for the side
//! now to move and the notifier receives a fresh snapshot.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::move_record::{LastMove, MoveRecord, MoveSpecial};
use crate::move_generation::legal_move_apply::{apply_planned_move, PlannedMove};
use crate::move_generation::legal_move_checks::{
    is_checkmate, is_king_in_check, is_stalemate, leaves_king_in_check,
};
use crate::move_generation::legal_move_generator::legal_destinations;
use crate::move_generation::special_moves::{is_castling_attempt, plan_move, validate_castling};
use crate::session::notifier::{NullNotifier, SessionNotifier};
use crate::session::session_config::SessionConfig;
use crate::session::session_errors::MoveError;
use crate::session::snapshot::{board_view, GameSnapshot, LastMoveView, PieceView, PlayerView, PlayersView};
use crate::utils::algebraic::square_label;
use crate::utils::event_log::EventLog;
use crate::utils::move_notation::{describe_move, CheckSuffix};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Running,
    Ended,
    Aborted,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionStatus::Running => write!(f, "running"),
            SessionStatus::Ended => write!(f, "ended"),
            SessionStatus::Aborted => write!(f, "aborted"),
        }
    }
}

/// How a finished game finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameOutcome {
    Checkmate { winner: Color },
    Stalemate,
    Aborted,
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::Checkmate { winner } => write!(f, "checkmate, {winner} wins"),
            GameOutcome::Stalemate => write!(f, "stalemate"),
            GameOutcome::Aborted => write!(f, "aborted"),
        }
    }
}

/// Position after an accepted move, from the point of view of the side now
/// to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Continue,
    Check,
    Checkmate { winner: Color },
    Stalemate,
}

impl MoveOutcome {
    #[inline]
    pub fn is_game_over(self) -> bool {
        matches!(self, MoveOutcome::Checkmate { .. } | MoveOutcome::Stalemate)
    }
}

impl fmt::Display for MoveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveOutcome::Continue => write!(f, "continue"),
            MoveOutcome::Check => write!(f, "check"),
            MoveOutcome::Checkmate { winner } => write!(f, "checkmate, {winner} wins"),
            MoveOutcome::Stalemate => write!(f, "stalemate"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    pub player_id: String,
    pub username: String,
}

impl Player {
    pub fn new(player_id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            player_id: player_id.into(),
            username: username.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReport {
    pub record: MoveRecord,
    pub outcome: MoveOutcome,
}

#[derive(Debug, Clone)]
struct PlayerState {
    player: Player,
    move_history: Vec<MoveRecord>,
    captured: Vec<Piece>,
}

impl PlayerState {
    fn new(player: Player) -> Self {
        Self {
            player,
            move_history: Vec::new(),
            captured: Vec::new(),
        }
    }
}

pub struct GameSession {
    id: String,
    players: [PlayerState; 2],
    board: Board,
    turn: Color,
    status: SessionStatus,
    outcome: Option<GameOutcome>,
    last_move: Option<LastMove>,
    ply: u32,
    started_at: DateTime<Utc>,
    config: SessionConfig,
    notifier: Arc<dyn SessionNotifier>,
    log: Arc<EventLog>,
}

impl GameSession {
    /// Standard starting position, White to move.
    pub fn new(id: impl Into<String>, white: Player, black: Player, config: SessionConfig) -> Self {
        Self {
            id: id.into(),
            players: [PlayerState::new(white), PlayerState::new(black)],
            board: Board::standard(),
            turn: Color::White,
            status: SessionStatus::Running,
            outcome: None,
            last_move: None,
            ply: 0,
            started_at: Utc::now(),
            config,
            notifier: Arc::new(NullNotifier),
            log: Arc::new(EventLog::new(config.log_capacity, config.log_level)),
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn SessionNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_log(mut self, log: Arc<EventLog>) -> Self {
        self.log = log;
        self
    }

    /// Replaces the board and side to move. No previous move is remembered,
    /// so en passant is unavailable on the first ply.
    pub fn with_position(mut self, board: Board, turn: Color) -> Self {
        self.board = board;
        self.turn = turn;
        self.last_move = None;
        self
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    #[inline]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    #[inline]
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    #[inline]
    pub fn last_move(&self) -> Option<&LastMove> {
        self.last_move.as_ref()
    }

    #[inline]
    pub fn ply(&self) -> u32 {
        self.ply
    }

    #[inline]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn player(&self, color: Color) -> &Player {
        &self.players[color.index()].player
    }

    pub fn move_history(&self, color: Color) -> &[MoveRecord] {
        &self.players[color.index()].move_history
    }

    pub fn captured(&self, color: Color) -> &[Piece] {
        &self.players[color.index()].captured
    }

    pub fn side_of(&self, player_id: &str) -> Option<Color> {
        [Color::White, Color::Black]
            .into_iter()
            .find(|color| self.player(*color).player_id == player_id)
    }

    /// Is the side to move in check?
    pub fn is_in_check(&self) -> bool {
        is_king_in_check(&self.board, self.turn)
    }

    /// Destinations the piece on `from` may legally move to. Empty once the
    /// game is over.
    pub fn legal_destinations(&self, from: Square) -> Vec<Square> {
        if self.status != SessionStatus::Running {
            return Vec::new();
        }
        legal_destinations(&self.board, self.last_move.as_ref(), from)
    }

    /// Runs the move pipeline for `player_id`. `promotion` only matters when
    /// a pawn reaches its last row; `None` falls back to the configured
    /// default.
    pub fn apply_move(
        &mut self,
        from: Square,
        to: Square,
        player_id: &str,
        promotion: Option<PieceKind>,
    ) -> Result<MoveReport, MoveError> {
        match self.run_move_pipeline(from, to, player_id, promotion) {
            Ok(report) => {
                self.log.info(
                    Some(&self.id),
                    format!(
                        "{} played {} ({})",
                        report.record.color, report.record.notation, report.outcome
                    ),
                );
                if report.outcome.is_game_over() {
                    self.log
                        .info(Some(&self.id), format!("game ended: {}", report.outcome));
                }
                self.publish();
                Ok(report)
            }
            Err(err) => {
                self.log.info(
                    Some(&self.id),
                    format!(
                        "rejected {}{} from '{player_id}': {}",
                        square_label(from),
                        square_label(to),
                        err.code()
                    ),
                );
                Err(err)
            }
        }
    }

    /// Running → Aborted. Any other state is terminal already.
    pub fn abort(&mut self) -> Result<(), MoveError> {
        if self.status != SessionStatus::Running {
            return Err(MoveError::GameEnded);
        }
        self.status = SessionStatus::Aborted;
        self.outcome = Some(GameOutcome::Aborted);
        self.log.info(Some(&self.id), "session aborted");
        self.publish();
        Ok(())
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            game_id: self.id.clone(),
            version: self.ply,
            started_at: self.started_at,
            board: board_view(&self.board),
            current_turn: self.turn,
            status: self.status,
            outcome: self.outcome,
            in_check: self.is_in_check(),
            last_move: self.last_move.as_ref().map(LastMoveView::from),
            players: PlayersView {
                white: self.player_view(Color::White),
                black: self.player_view(Color::Black),
            },
        }
    }

    fn player_view(&self, color: Color) -> PlayerView {
        let state = &self.players[color.index()];
        PlayerView {
            player_id: state.player.player_id.clone(),
            username: state.player.username.clone(),
            color,
            move_history: state
                .move_history
                .iter()
                .map(|record| record.notation.clone())
                .collect(),
            captured_figures: state.captured.iter().map(PieceView::from).collect(),
        }
    }

    fn publish(&self) {
        if let Err(err) = self.notifier.notify(self.snapshot()) {
            self.log
                .warn(Some(&self.id), format!("notifier failed: {err}"));
        }
    }

    fn run_move_pipeline(
        &mut self,
        from: Square,
        to: Square,
        player_id: &str,
        promotion: Option<PieceKind>,
    ) -> Result<MoveReport, MoveError> {
        if self.status != SessionStatus::Running {
            return Err(MoveError::GameEnded);
        }

        let piece = *self.board.get(from).ok_or(MoveError::EmptySquare)?;
        if piece.color != self.turn || self.player(self.turn).player_id != player_id {
            return Err(MoveError::WrongTurn);
        }
        let mover = piece.color;
        if !self.board.is_in_bounds(to) {
            return Err(MoveError::IllegalMove);
        }

        let planned = if is_castling_attempt(&self.board, &piece, from, to) {
            validate_castling(&self.board, from, to).map_err(|block| {
                self.log
                    .debug(Some(&self.id), format!("castling refused: {block}"));
                MoveError::CastlingNotAllowed
            })?
        } else {
            let promotion_kind = promotion.unwrap_or(self.config.default_promotion);
            let planned = plan_move(
                &self.board,
                self.last_move.as_ref(),
                from,
                to,
                promotion_kind,
            )
            .ok_or(MoveError::IllegalMove)?;
            if leaves_king_in_check(&self.board, &planned, mover) {
                return Err(MoveError::SelfCheck);
            }
            if let MoveSpecial::Promotion { kind } = planned.special {
                if !kind.is_promotable() {
                    return Err(MoveError::InvalidPromotionChoice);
                }
            }
            planned
        };

        self.commit(planned, mover)
    }

    fn commit(&mut self, planned: PlannedMove, mover: Color) -> Result<MoveReport, MoveError> {
        let applied =
            apply_planned_move(&mut self.board, &planned).map_err(|_| MoveError::IllegalMove)?;

        if let Some(captured) = applied.captured {
            self.players[mover.index()].captured.push(captured);
        }
        self.last_move = Some(LastMove {
            piece: applied.after,
            from: planned.from,
            to: planned.to,
            was_two_square_pawn_advance: planned.special == MoveSpecial::DoubleStep,
        });
        self.ply += 1;
        self.turn = mover.opposite();

        let outcome = self.evaluate_position();
        match outcome {
            MoveOutcome::Checkmate { winner } => {
                self.status = SessionStatus::Ended;
                self.outcome = Some(GameOutcome::Checkmate { winner });
            }
            MoveOutcome::Stalemate => {
                self.status = SessionStatus::Ended;
                self.outcome = Some(GameOutcome::Stalemate);
            }
            MoveOutcome::Continue | MoveOutcome::Check => {}
        }

        let suffix = match outcome {
            _ if !self.config.annotate_checks => CheckSuffix::None,
            MoveOutcome::Check => CheckSuffix::Check,
            MoveOutcome::Checkmate { .. } => CheckSuffix::Checkmate,
            MoveOutcome::Continue | MoveOutcome::Stalemate => CheckSuffix::None,
        };
        let record = MoveRecord {
            ply: self.ply,
            piece_id: applied.before.id,
            color: mover,
            kind: applied.before.kind,
            from: planned.from,
            to: planned.to,
            captured: applied.captured,
            special: planned.special,
            notation: describe_move(
                applied.before.kind,
                planned.from,
                planned.to,
                applied.captured.is_some(),
                planned.special,
                suffix,
            ),
            played_at: Utc::now(),
        };
        self.players[mover.index()]
            .move_history
            .push(record.clone());

        Ok(MoveReport { record, outcome })
    }

    /// Check, checkmate or stalemate for the side to move.
    fn evaluate_position(&self) -> MoveOutcome {
        let side = self.turn;
        let last = self.last_move.as_ref();
        if is_king_in_check(&self.board, side) {
            if is_checkmate(&self.board, last, side) {
                MoveOutcome::Checkmate {
                    winner: side.opposite(),
                }
            } else {
                MoveOutcome::Check
            }
        } else if is_stalemate(&self.board, last, side) {
            MoveOutcome::Stalemate
        } else {
            MoveOutcome::Continue
        }
    }
}
