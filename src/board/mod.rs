//! Board representation and cell types.
//!
//! Contains the marks, the tagged cell enum and the immutable 3×3 board
//! snapshot recorded in the game history.

pub mod mark;
pub mod state;

pub use mark::{Cell, Mark};
pub use state::{Board, CELL_COUNT};
