//! Game state machine.
//!
//! Holds the history of boards, the current position, the turn clock, the win
//! tally and the mode/theme flags, and derives everything the presentation
//! layer displays.

pub mod event;
pub mod settings;
pub mod state;
pub mod timer;
pub mod view;

pub use event::GameEvent;
pub use settings::{Mode, Theme};
pub use state::{Game, GameError, MoveOutcome, Scores, TickOutcome, COMPUTER_SEAT};
pub use timer::{Countdown, TickScheduler, TICK_INTERVAL, TURN_SECONDS};
pub use view::{GameView, HistoryItem};
