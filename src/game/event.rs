//! Events emitted by the game for the presentation layer.
//!
//! The core never plays sounds or touches a display; it queues these and the
//! front end decides what to do with them.

use std::fmt;

use serde::Serialize;

use crate::board::Mark;

use super::settings::{Mode, Theme};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameEvent {
    /// A mark was written to a cell, by a click or by the computer seat.
    Moved { index: usize, mark: Mark, by_computer: bool },
    /// The computer seat's clock ran out on a full board; the board was recorded unchanged.
    ComputerPassed { mark: Mark },
    /// A winning line appeared and `mark` was credited.
    Won { mark: Mark },
    /// A human seat's clock ran out and the turn passed without a move.
    TurnForfeited { mark: Mark },
    /// One second elapsed.
    Tick { remaining: u32 },
    Jumped { to: usize },
    Reset,
    ThemeChanged { theme: Theme },
    ModeChanged { mode: Mode },
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Moved {
                index,
                mark,
                by_computer,
            } => {
                if *by_computer {
                    write!(f, "move {index} {mark} computer")
                } else {
                    write!(f, "move {index} {mark}")
                }
            }
            Self::ComputerPassed { mark } => write!(f, "pass {mark} computer"),
            Self::Won { mark } => write!(f, "win {mark}"),
            Self::TurnForfeited { mark } => write!(f, "forfeit {mark}"),
            Self::Tick { remaining } => write!(f, "tick {remaining}"),
            Self::Jumped { to } => write!(f, "jump {to}"),
            Self::Reset => write!(f, "reset"),
            Self::ThemeChanged { theme } => write!(f, "theme {}", theme.name()),
            Self::ModeChanged { mode } => write!(f, "mode {}", mode.name()),
        }
    }
}
