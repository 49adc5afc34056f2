use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::time::Duration;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use tictactoe::game::Game;
use tictactoe::movegen::{legal_moves, play_random, random_move};
use tictactoe::protocol::{encode_board, parse_board};
use tictactoe::rules::{evaluate_winner, winning_line};
use tictactoe::selfplay::{play_game, run_self_play, SelfPlayConfig};

const MIDGAME: &str = "XO./.X./O..";
const LATE_TIE: &str = "XOX/XOO/OX.";
const WON: &str = "OOX/.X./X..";

fn bench_evaluate_winner(c: &mut Criterion) {
    let boards: Vec<_> = [MIDGAME, LATE_TIE, WON]
        .iter()
        .map(|s| parse_board(s).unwrap())
        .collect();
    c.bench_function("evaluate_winner_3_boards", |b| {
        b.iter(|| {
            for board in &boards {
                black_box(evaluate_winner(black_box(board.cells())));
            }
        })
    });
    c.bench_function("winning_line_won_board", |b| {
        let board = parse_board(WON).unwrap();
        b.iter(|| winning_line(black_box(board.cells())))
    });
}

fn bench_movegen(c: &mut Criterion) {
    let board = parse_board(MIDGAME).unwrap();
    c.bench_function("legal_moves_midgame", |b| {
        b.iter(|| legal_moves(black_box(&board)))
    });

    let mut rng = SmallRng::seed_from_u64(42);
    c.bench_function("random_move_midgame", |b| {
        b.iter(|| random_move(black_box(&board), &mut rng))
    });

    let mut rng = SmallRng::seed_from_u64(43);
    c.bench_function("play_random_midgame", |b| {
        b.iter(|| play_random(black_box(&board), tictactoe::board::Mark::O, &mut rng))
    });
}

fn bench_notation(c: &mut Criterion) {
    let board = parse_board(LATE_TIE).unwrap();
    c.bench_function("encode_board", |b| b.iter(|| encode_board(black_box(&board))));
    c.bench_function("parse_board_rows", |b| {
        b.iter(|| parse_board(black_box(LATE_TIE)))
    });
}

fn bench_game(c: &mut Criterion) {
    c.bench_function("game_apply_five_moves", |b| {
        b.iter(|| {
            let mut game = Game::new();
            for i in [0, 3, 1, 4, 2] {
                let _ = game.apply_move(black_box(i));
            }
            black_box(game.winner())
        })
    });

    let mut rng = SmallRng::seed_from_u64(7);
    c.bench_function("game_tick_countdown", |b| {
        let mut game = Game::with_turn_seconds(3600);
        b.iter(|| {
            let outcome = game.tick(&mut rng);
            game.drain_events();
            black_box(outcome)
        })
    });
}

fn bench_selfplay(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(11);
    c.bench_function("selfplay_single_game", |b| {
        b.iter(|| play_game(0, &mut rng))
    });

    let mut group = c.benchmark_group("selfplay_batch");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(10));
    group.bench_function("1000_games_4_threads", |b| {
        let config = SelfPlayConfig {
            num_games: 1000,
            threads: 4,
            seed: 1,
            quiet: true,
        };
        b.iter(|| run_self_play(black_box(&config)))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_evaluate_winner,
    bench_movegen,
    bench_notation,
    bench_game,
    bench_selfplay,
);
criterion_main!(benches);
