//! Text protocol between the engine and a front end.
//!
//! Covers the command parser, the nine-character board notation and the
//! formatting of events and views written back after every state change.

pub mod format;
pub mod notation;
pub mod parser;

pub use format::{write_events, write_snapshot, write_view};
pub use notation::{encode_board, parse_board, NotationError};
pub use parser::{parse_command, Command};
