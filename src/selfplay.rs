//! Self-play game generation.
//!
//! Plays complete games with the random opponent on both seats, recording
//! every move and board. Useful for exercising the rules engine and the win
//! tally at volume, and for producing sample game records as JSON Lines.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::{debug, info};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::board::Mark;
use crate::game::{Game, Scores};
use crate::movegen::random_move;
use crate::protocol::encode_board;

/// Configuration for self-play game generation.
#[derive(Clone, Debug)]
pub struct SelfPlayConfig {
    /// Number of games to play.
    pub num_games: usize,
    /// Number of parallel threads for concurrent games.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Suppress per-game progress logging.
    pub quiet: bool,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 100,
            threads: 4,
            seed: 0,
            quiet: false,
        }
    }
}

/// A complete self-play game record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GameRecord {
    /// Sequential game ID.
    pub game_id: usize,
    /// Cells played, in order. X moves first.
    pub moves: Vec<usize>,
    /// Board notation after each move.
    pub boards: Vec<String>,
    /// The mark that completed a line, if any.
    pub winner: Option<Mark>,
}

/// Win tally over a batch of games.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub games: usize,
    pub scores: Scores,
    pub undecided: usize,
}

impl Summary {
    pub fn add(&mut self, game: &GameRecord) {
        self.games += 1;
        match game.winner {
            Some(mark) => self.scores.credit(mark),
            None => self.undecided += 1,
        }
    }
}

/// Plays one game, both seats random, until a line is completed or the
/// board is full.
pub fn play_game(game_id: usize, rng: &mut SmallRng) -> GameRecord {
    let mut game = Game::new();
    let mut moves = Vec::new();
    let mut boards = Vec::new();

    while game.winner().is_none() {
        let Some(index) = random_move(game.board(), rng) else {
            break;
        };
        // random_move only yields on-board cells.
        if game.apply_move(index).is_err() {
            break;
        }
        moves.push(index);
        boards.push(encode_board(game.board()));
    }

    GameRecord {
        game_id,
        moves,
        boards,
        winner: game.winner(),
    }
}

fn rng_for(seed: u64, game_id: usize) -> SmallRng {
    if seed != 0 {
        SmallRng::seed_from_u64(seed.wrapping_add(game_id as u64))
    } else {
        SmallRng::from_entropy()
    }
}

fn outcome_text(game: &GameRecord) -> String {
    match game.winner {
        Some(w) => format!("{w} wins"),
        None => "no winner".to_string(),
    }
}

/// Runs self-play generation, producing multiple game records.
///
/// When `config.threads > 1`, games are played concurrently using rayon.
/// Records come back in completion order.
pub fn run_self_play(config: &SelfPlayConfig) -> Vec<GameRecord> {
    let mut games = Vec::with_capacity(config.num_games);
    run_self_play_with_callback(config, |game| {
        games.push(game);
    });
    games
}

/// Runs self-play generation, calling `on_game` with each completed game record.
pub fn run_self_play_with_callback<F>(config: &SelfPlayConfig, on_game: F)
where
    F: FnMut(GameRecord) + Send,
{
    if config.threads > 1 {
        run_self_play_parallel(config, on_game);
    } else {
        run_self_play_sequential(config, on_game);
    }
}

/// Sequential self-play: plays games one at a time.
fn run_self_play_sequential<F>(config: &SelfPlayConfig, mut on_game: F)
where
    F: FnMut(GameRecord),
{
    for i in 0..config.num_games {
        let mut rng = rng_for(config.seed, i);
        let game = play_game(i, &mut rng);
        if !config.quiet {
            debug!("Game {}/{}: {} in {} moves", i + 1, config.num_games, outcome_text(&game), game.moves.len());
        }
        on_game(game);
    }
}

/// Parallel self-play: plays games concurrently using rayon.
/// Uses a channel to deliver completed games to the callback from worker threads.
fn run_self_play_parallel<F>(config: &SelfPlayConfig, mut on_game: F)
where
    F: FnMut(GameRecord) + Send,
{
    use rayon::prelude::*;
    use std::sync::mpsc;

    let completed = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel::<GameRecord>();

    let pool = match rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()
    {
        Ok(pool) => pool,
        Err(e) => {
            info!("thread pool unavailable ({e}), playing sequentially");
            run_self_play_sequential(config, on_game);
            return;
        }
    };

    let config = config.clone();
    std::thread::scope(|scope| {
        scope.spawn(|| {
            pool.install(|| {
                (0..config.num_games)
                    .into_par_iter()
                    .for_each_with(tx, |tx, i| {
                        let mut rng = rng_for(config.seed, i);
                        let game = play_game(i, &mut rng);
                        if !config.quiet {
                            let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                            debug!(
                                "Game {}/{}: {} in {} moves",
                                n,
                                config.num_games,
                                outcome_text(&game),
                                game.moves.len()
                            );
                        }
                        let _ = tx.send(game);
                    });
            });
        });

        // Receive completed games on this thread and pass to callback.
        for game in rx {
            on_game(game);
        }
    });
}

/// Tallies wins over a set of game records.
pub fn summarize(games: &[GameRecord]) -> Summary {
    let mut summary = Summary::default();
    for game in games {
        summary.add(game);
    }
    summary
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    for game in games {
        serde_json::to_writer(&mut *out, game).map_err(std::io::Error::other)?;
        writeln!(out)?;
    }
    out.flush()
}
