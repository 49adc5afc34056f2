//! Winner evaluation.
//!
//! Scans the eight fixed lines of the board in a fixed order and reports the
//! first one held entirely by a single mark. Draws are not detected: a full
//! board with no line reads the same as a game still in progress.

use crate::board::{Cell, Mark, CELL_COUNT};

/// The eight winning lines, in evaluation order: rows top to bottom, columns
/// left to right, the down-right diagonal, then the down-left diagonal.
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Returns the first line held by one mark, together with that mark.
///
/// Any slice that is not exactly nine cells long has no winner.
pub fn winning_line(cells: &[Cell]) -> Option<([usize; 3], Mark)> {
    if cells.len() != CELL_COUNT {
        return None;
    }
    for line in &LINES {
        let [a, b, c] = *line;
        if let Cell::Occupied(m) = cells[a] {
            if cells[b] == cells[a] && cells[c] == cells[a] {
                return Some((*line, m));
            }
        }
    }
    None
}

/// Returns the mark holding the first complete line, if any.
pub fn evaluate_winner(cells: &[Cell]) -> Option<Mark> {
    winning_line(cells).map(|(_, m)| m)
}
