//! The game state machine.
//!
//! Owns the move history, the pointer into it, the turn clock, the win tally
//! and the mode/theme flags. Every transition goes through a method here and
//! queues a [`GameEvent`] for the presentation layer.
//!
//! Moves are not validated against the position: clicking an occupied cell
//! overwrites it, and play continues after a win. Only indices that fall off
//! the board or outside the history are rejected.

use std::collections::VecDeque;

use log::debug;
use rand::Rng;
use serde::Serialize;
use thiserror::Error;

use crate::board::{Board, Mark, CELL_COUNT};
use crate::movegen::play_random;
use crate::rules::{evaluate_winner, winning_line};

use super::event::GameEvent;
use super::settings::{Mode, Theme};
use super::timer::{Countdown, TURN_SECONDS};

/// The seat played by the random opponent in single-player mode.
pub const COMPUTER_SEAT: Mark = Mark::O;

/// Errors for requests that fall outside the board or the history.
///
/// A rejected request leaves the game untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("cell {0} is off the board (expected 0..=8)")]
    CellOutOfRange(usize),

    #[error("move {requested} is out of range (history has {len} entries)")]
    MoveOutOfRange { requested: usize, len: usize },
}

/// Games won by each seat. Survives `reset`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Scores {
    pub x: u32,
    pub o: u32,
}

impl Scores {
    pub fn get(&self, mark: Mark) -> u32 {
        match mark {
            Mark::X => self.x,
            Mark::O => self.o,
        }
    }

    pub fn credit(&mut self, mark: Mark) {
        match mark {
            Mark::X => self.x += 1,
            Mark::O => self.o += 1,
        }
    }
}

/// What a recorded move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Cell written, `None` when the computer seat found no empty cell.
    pub index: Option<usize>,
    pub mark: Mark,
    /// Winner of the resulting board.
    pub winner: Option<Mark>,
    /// Whether this move created the winning line and was credited.
    pub scored: bool,
}

/// What a clock tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The clock is still running with this many seconds left.
    Counting(u32),
    /// The computer seat's clock ran out and it played.
    ComputerMoved(MoveOutcome),
    /// A human seat's clock ran out; the turn passed to the other seat.
    TurnForfeited(Mark),
}

/// A tic-tac-toe session.
#[derive(Debug, Clone)]
pub struct Game {
    history: Vec<Board>,
    current_move: usize,
    /// Plies that passed on timeout without a board change. They shift turn
    /// parity without adding history entries.
    forfeits: usize,
    scores: Scores,
    countdown: Countdown,
    mode: Mode,
    theme: Theme,
    epoch: u64,
    events: VecDeque<GameEvent>,
}

impl Game {
    /// Creates a new game with the default turn length.
    pub fn new() -> Self {
        Game::with_turn_seconds(TURN_SECONDS)
    }

    /// Creates a new game whose turns last `turn_seconds`.
    pub fn with_turn_seconds(turn_seconds: u32) -> Self {
        Game {
            history: vec![Board::empty()],
            current_move: 0,
            forfeits: 0,
            scores: Scores::default(),
            countdown: Countdown::new(turn_seconds),
            mode: Mode::default(),
            theme: Theme::default(),
            epoch: 0,
            events: VecDeque::new(),
        }
    }

    pub fn history(&self) -> &[Board] {
        &self.history
    }

    /// Index of the displayed board in the history.
    pub fn current_move(&self) -> usize {
        self.current_move
    }

    /// Plies elapsed at the displayed position, counting forfeited turns.
    pub fn ply(&self) -> usize {
        self.current_move + self.forfeits
    }

    pub fn forfeits(&self) -> usize {
        self.forfeits
    }

    /// The seat whose turn it is.
    pub fn active_player(&self) -> Mark {
        Mark::for_ply(self.ply())
    }

    /// The board at the current position.
    pub fn board(&self) -> &Board {
        &self.history[self.current_move]
    }

    pub fn winner(&self) -> Option<Mark> {
        evaluate_winner(self.board().cells())
    }

    /// The first complete line on the current board, for highlighting.
    pub fn winning_line(&self) -> Option<[usize; 3]> {
        winning_line(self.board().cells()).map(|(line, _)| line)
    }

    /// "Winner: X" once a line is complete, otherwise "Next player: X".
    pub fn status_text(&self) -> String {
        match self.winner() {
            Some(mark) => format!("Winner: {mark}"),
            None => format!("Next player: {}", self.active_player()),
        }
    }

    pub fn time_left(&self) -> u32 {
        self.countdown.remaining()
    }

    pub fn turn_seconds(&self) -> u32 {
        self.countdown.turn_seconds()
    }

    /// Changes the turn length from the next clock restart on.
    pub fn set_turn_seconds(&mut self, turn_seconds: u32) {
        self.countdown.set_turn_seconds(turn_seconds);
    }

    pub fn scores(&self) -> Scores {
        self.scores
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            self.mode = mode;
            self.events.push_back(GameEvent::ModeChanged { mode });
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        if self.theme != theme {
            self.theme = theme;
            self.events.push_back(GameEvent::ThemeChanged { theme });
        }
    }

    /// Changes whenever the time left, the active player or the board does.
    ///
    /// A driver re-arms its pending tick whenever this moves.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Takes all events queued since the last drain.
    pub fn drain_events(&mut self) -> VecDeque<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Plays the active mark on `index`, overwriting whatever is there.
    ///
    /// Any moves after the current position are discarded first.
    pub fn apply_move(&mut self, index: usize) -> Result<MoveOutcome, GameError> {
        if index >= CELL_COUNT {
            return Err(GameError::CellOutOfRange(index));
        }
        let mark = self.active_player();
        let next = self
            .board()
            .with_mark(index, mark)
            .ok_or(GameError::CellOutOfRange(index))?;
        Ok(self.record(next, mark, Some(index), false))
    }

    /// Moves the history pointer. History itself is kept until the next move.
    ///
    /// The target is a recorded position, so forfeited turns are dropped and
    /// the turn follows the move number again.
    pub fn jump_to(&mut self, to: usize) -> Result<(), GameError> {
        if to >= self.history.len() {
            return Err(GameError::MoveOutOfRange {
                requested: to,
                len: self.history.len(),
            });
        }
        self.current_move = to;
        self.forfeits = 0;
        self.bump();
        self.events.push_back(GameEvent::Jumped { to });
        debug!("jumped to move {to}");
        Ok(())
    }

    /// Clears the board and history and refills the clock. Scores, mode and
    /// theme are kept.
    pub fn reset(&mut self) {
        self.history.clear();
        self.history.push(Board::empty());
        self.current_move = 0;
        self.forfeits = 0;
        self.countdown.restart();
        self.bump();
        self.events.push_back(GameEvent::Reset);
        debug!("game reset, scores {}-{}", self.scores.x, self.scores.o);
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.set_theme(self.theme.toggled());
        self.theme
    }

    pub fn toggle_mode(&mut self) -> Mode {
        self.set_mode(self.mode.toggled());
        self.mode
    }

    /// Advances the clock by one second.
    ///
    /// When the count reaches zero the expiry is handled in the same tick:
    /// the computer seat plays a random cell in single-player mode, any other
    /// seat forfeits its turn. Either way the clock refills.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> TickOutcome {
        if !self.countdown.is_expired() {
            let remaining = self.countdown.decrement();
            self.bump();
            self.events.push_back(GameEvent::Tick { remaining });
            if remaining > 0 {
                return TickOutcome::Counting(remaining);
            }
        }
        self.expire(rng)
    }

    fn expire<R: Rng + ?Sized>(&mut self, rng: &mut R) -> TickOutcome {
        let mark = self.active_player();
        if self.mode == Mode::Single && mark == COMPUTER_SEAT {
            let (next, index) = play_random(self.board(), mark, rng);
            let outcome = self.record(next, mark, index, true);
            return TickOutcome::ComputerMoved(outcome);
        }

        self.forfeits += 1;
        self.countdown.restart();
        self.bump();
        self.events.push_back(GameEvent::TurnForfeited { mark });
        debug!("{mark} ran out of time, turn passes to {}", mark.opponent());
        TickOutcome::TurnForfeited(mark)
    }

    /// Appends `next` after the current position and credits the mover if
    /// the new board holds a line, even one that was already there.
    fn record(&mut self, next: Board, mark: Mark, index: Option<usize>, by_computer: bool) -> MoveOutcome {
        self.history.truncate(self.current_move + 1);
        self.history.push(next);
        self.current_move = self.history.len() - 1;
        self.countdown.restart();
        self.bump();

        match index {
            Some(index) => {
                self.events.push_back(GameEvent::Moved {
                    index,
                    mark,
                    by_computer,
                });
                debug!("{mark} played cell {index} (move {})", self.current_move);
            }
            None => {
                self.events.push_back(GameEvent::ComputerPassed { mark });
                debug!("{mark} found no empty cell (move {})", self.current_move);
            }
        }

        let winner = evaluate_winner(next.cells());
        let scored = winner.is_some();
        if scored {
            self.scores.credit(mark);
            self.events.push_back(GameEvent::Won { mark });
            debug!("{mark} wins, scores {}-{}", self.scores.x, self.scores.o);
        }

        MoveOutcome {
            index,
            mark,
            winner,
            scored,
        }
    }

    fn bump(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}
