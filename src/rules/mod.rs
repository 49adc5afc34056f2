//! Game rules.
//!
//! Pure functions over a board: which mark, if any, holds a complete line.

pub mod winner;

pub use winner::{evaluate_winner, winning_line, LINES};
