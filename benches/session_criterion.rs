use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use chess_duel::game_state::board::Board;
use chess_duel::game_state::chess_types::{Color, PieceKind, Square};
use chess_duel::move_generation::legal_move_checks::{is_checkmate, is_stalemate};
use chess_duel::move_generation::legal_move_generator::legal_moves;
use chess_duel::session::game_session::{GameSession, Player, SessionStatus};
use chess_duel::session::session_config::SessionConfig;
use chess_duel::utils::algebraic::algebraic_to_square;

const FOOLS_MATE: &[(&str, &str)] = &[("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")];

fn sq(name: &str) -> Square {
    algebraic_to_square(name).expect("benchmark square should parse")
}

fn stalemate_board() -> Board {
    let mut board = Board::empty();
    board.place(PieceKind::King, Color::White, sq("a1"));
    board.place(PieceKind::King, Color::Black, sq("b3"));
    board.place(PieceKind::Knight, Color::Black, sq("a3"));
    board
}

fn back_rank_mate_board() -> Board {
    let mut board = Board::empty();
    board.place(PieceKind::King, Color::White, sq("g1"));
    board.place(PieceKind::Pawn, Color::White, sq("f2"));
    board.place(PieceKind::Pawn, Color::White, sq("g2"));
    board.place(PieceKind::Pawn, Color::White, sq("h2"));
    board.place(PieceKind::Rook, Color::Black, sq("a1"));
    board.place(PieceKind::King, Color::Black, sq("e8"));
    board
}

fn play_fools_mate() -> SessionStatus {
    let mut session = GameSession::new(
        "bench",
        Player::new("w", "white"),
        Player::new("b", "black"),
        SessionConfig::default(),
    );
    for (from, to) in FOOLS_MATE {
        let player_id = session.player(session.turn()).player_id.clone();
        session
            .apply_move(sq(from), sq(to), &player_id, None)
            .expect("fool's mate move should be legal");
    }
    session.status()
}

fn bench_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("session");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(20);

    // Correctness guard before benchmarking.
    assert_eq!(play_fools_mate(), SessionStatus::Ended);
    group.bench_function("fools_mate_pipeline", |b| {
        b.iter(|| black_box(play_fools_mate()));
    });

    let start = Board::standard();
    assert_eq!(legal_moves(&start, None, Color::White).len(), 20);
    group.bench_with_input(
        BenchmarkId::from_parameter("legal_moves_start"),
        &start,
        |b, board| {
            b.iter(|| black_box(legal_moves(black_box(board), None, Color::White).len()));
        },
    );

    let stalemate = stalemate_board();
    assert!(is_stalemate(&stalemate, None, Color::White));
    group.bench_with_input(
        BenchmarkId::from_parameter("stalemate_scan"),
        &stalemate,
        |b, board| {
            b.iter(|| black_box(is_stalemate(black_box(board), None, Color::White)));
        },
    );

    let mate = back_rank_mate_board();
    assert!(is_checkmate(&mate, None, Color::White));
    group.bench_with_input(
        BenchmarkId::from_parameter("checkmate_analysis"),
        &mate,
        |b, board| {
            b.iter(|| black_box(is_checkmate(black_box(board), None, Color::White)));
        },
    );

    group.finish();
}

criterion_group!(session_benches, bench_session);
criterion_main!(session_benches);
