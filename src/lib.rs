//! Crate root module declarations for the chess duel rules engine.
//!
//! Exposes the board model, per-piece movement rules, check analysis and the
//! special-move validator, plus the session layer (move pipeline, registry,
//! notifier, snapshots) and the console front-end built on top of it.

pub mod game_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod move_record;
}

pub mod moves {
    pub mod bishop_moves;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod pawn_moves;
    pub mod piece_rules;
    pub mod queen_moves;
    pub mod rook_moves;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod special_moves;
}

pub mod session {
    pub mod game_session;
    pub mod notifier;
    pub mod registry;
    pub mod session_config;
    pub mod session_errors;
    pub mod snapshot;
}

pub mod console {
    pub mod console_top;
}

pub mod utils {
    pub mod algebraic;
    pub mod event_log;
    pub mod move_notation;
    pub mod render_game_state;
}
