//! Tic-tac-toe engine binary.
//!
//! Reads commands from stdin and writes responses to stdout. A reader thread
//! forwards input lines over a channel; the main thread waits on that channel
//! until the next clock tick is due, so commands and ticks are handled one at
//! a time on a single thread.

use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use log::{debug, info};

use tictactoe::config::EngineConfig;
use tictactoe::engine::Engine;
use tictactoe::game::TickScheduler;
use tictactoe::protocol::{parse_command, Command};

const HELP: &str = "\
Tic-tac-toe engine speaking a line protocol on stdin/stdout

USAGE:
  tictactoe [OPTIONS]

OPTIONS:
  --turn-seconds N      Seconds per turn            [env: TTT_TURN_SECONDS] [default: 10]
  --tick-ms N           Clock interval, 0 = manual  [env: TTT_TICK_MS]      [default: 1000]
  --seed N              Seed for the computer seat  [env: TTT_SEED]         [default: entropy]
  --single              Start in single-player mode
  --dark                Start with the dark theme

FLAGS:
  -h, --help            Print help information
";

/// What woke the main loop.
enum Input {
    Line(String),
    Tick,
    Closed,
}

fn main() -> Result<()> {
    env_logger::builder().format_target(false).init();

    if std::env::args().any(|a| a == "-h" || a == "--help") {
        print!("{HELP}");
        return Ok(());
    }

    let config = EngineConfig::from_env().context("invalid configuration")?;
    info!(
        "starting: {}s turns, clock {:?}, mode {}",
        config.turn_seconds,
        config.tick_interval,
        config.mode.name()
    );

    let (tx, rx) = mpsc::channel::<String>();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(l) => {
                    if tx.send(l).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    });

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    run(&config, &rx, &mut out)?;
    info!("shutting down");
    Ok(())
}

/// Runs the protocol loop until `quit` or end of input.
fn run<W: Write>(config: &EngineConfig, rx: &Receiver<String>, out: &mut W) -> Result<()> {
    let mut engine = Engine::new(config);
    let mut scheduler = config.tick_interval.map(TickScheduler::new);
    if let Some(s) = scheduler.as_mut() {
        s.arm(Instant::now());
    }
    let mut epoch = engine.epoch();

    loop {
        let input = match scheduler.as_mut() {
            Some(s) => next_input(rx, s),
            None => match rx.recv() {
                Ok(line) => Input::Line(line),
                Err(_) => Input::Closed,
            },
        };

        match input {
            Input::Closed => break,
            Input::Tick => engine.handle_tick(out)?,
            Input::Line(line) => {
                let Some(cmd) = parse_command(&line) else {
                    continue;
                };
                if !dispatch(&mut engine, cmd, out)? {
                    break;
                }
            }
        }

        // Anything that touched the clock, the turn or the board cancels the
        // pending tick and starts a fresh second.
        if engine.epoch() != epoch {
            epoch = engine.epoch();
            if let Some(s) = scheduler.as_mut() {
                s.arm(Instant::now());
                debug!("tick re-armed (generation {})", s.generation());
            }
        }
    }

    if let Some(s) = scheduler.as_mut() {
        if s.time_until(Instant::now()).is_some() {
            debug!("dropping pending tick (generation {})", s.generation());
        }
        s.cancel();
    }
    Ok(())
}

/// Waits for the next input line or the pending tick, whichever comes first.
fn next_input(rx: &Receiver<String>, scheduler: &mut TickScheduler) -> Input {
    loop {
        let now = Instant::now();
        if scheduler.fire(now) {
            return Input::Tick;
        }
        let wait = match scheduler.time_until(now) {
            Some(wait) => wait,
            None => {
                scheduler.arm(now);
                scheduler.interval()
            }
        };
        match rx.recv_timeout(wait) {
            Ok(line) => return Input::Line(line),
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => return Input::Closed,
        }
    }
}

/// Handles one command. Returns false when the session should end.
fn dispatch<W: Write>(engine: &mut Engine, cmd: Command, out: &mut W) -> io::Result<bool> {
    match cmd {
        Command::Hello => engine.handle_hello(out)?,
        Command::IsReady => engine.handle_isready(out)?,
        Command::SetOption { name, value } => engine.set_option(name, value),
        Command::NewGame => engine.handle_newgame(out)?,
        Command::Click { index } => engine.handle_click(index, out)?,
        Command::Jump { to } => engine.handle_jump(to, out)?,
        Command::Reset => engine.handle_reset(out)?,
        Command::Theme => engine.handle_theme(out)?,
        Command::Mode => engine.handle_mode(out)?,
        Command::Tick => engine.handle_tick(out)?,
        Command::Show => engine.handle_show(out)?,
        Command::Snapshot => engine.handle_snapshot(out)?,
        Command::Quit => return Ok(false),
    }
    Ok(true)
}
