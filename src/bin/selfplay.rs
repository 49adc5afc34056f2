//! Self-play game generation CLI.
//!
//! Plays random-vs-random games and outputs the game records as JSONL,
//! with a win tally on stderr.

use std::fs::File;
use std::io::{self, BufWriter};
use std::time::Instant;

use anyhow::{Context, Result};
use log::info;
use pico_args::Arguments;

use tictactoe::selfplay::{self, SelfPlayConfig};

const HELP: &str = "\
Play random-vs-random tic-tac-toe games and write them as JSON Lines

USAGE:
  selfplay [OPTIONS]

OPTIONS:
  --games N        Number of games to play (default: 100)
  --threads N      Number of parallel threads (default: 4)
  --seed N         Random seed, 0 for entropy (default: 0)
  --output FILE    Output file path (default: stdout)
  --quiet          Suppress summary output

FLAGS:
  -h, --help       Print help information
";

fn main() -> Result<()> {
    env_logger::builder().format_target(false).init();

    let mut pargs = Arguments::from_env();
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let defaults = SelfPlayConfig::default();
    let config = SelfPlayConfig {
        num_games: pargs.opt_value_from_str("--games")?.unwrap_or(defaults.num_games),
        threads: pargs.opt_value_from_str("--threads")?.unwrap_or(defaults.threads),
        seed: pargs.opt_value_from_str("--seed")?.unwrap_or(defaults.seed),
        quiet: pargs.contains("--quiet"),
    };
    let output_path: Option<String> = pargs.opt_value_from_str("--output")?;

    let rest = pargs.finish();
    if !rest.is_empty() {
        anyhow::bail!("unexpected arguments: {:?}", rest);
    }

    if !config.quiet {
        info!(
            "Self-play: {} games, {} threads, seed {}",
            config.num_games, config.threads, config.seed
        );
    }

    let start = Instant::now();
    let games = selfplay::run_self_play(&config);
    let elapsed = start.elapsed();

    if !config.quiet {
        let summary = selfplay::summarize(&games);
        eprintln!(
            "Completed {} games in {:.2}s: X {} / O {} / undecided {}",
            summary.games,
            elapsed.as_secs_f64(),
            summary.scores.x,
            summary.scores.o,
            summary.undecided
        );
    }

    match output_path {
        Some(path) => {
            let file = File::create(&path).with_context(|| format!("failed to create {path}"))?;
            let mut writer = BufWriter::new(file);
            selfplay::write_jsonl(&games, &mut writer).context("failed to write output")?;
            if !config.quiet {
                info!("Wrote {} games to {}", games.len(), path);
            }
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            selfplay::write_jsonl(&games, &mut writer).context("failed to write output")?;
        }
    }
    Ok(())
}
