//! Board notation.
//!
//! A board is written as nine characters in row-major order: `X`, `O`, or
//! `.` for an empty cell. The parser also accepts the rows separated by `/`
//! (`X../.O./...`), which reads better in hand-written test positions.

use thiserror::Error;

use crate::board::{Board, Cell, CELL_COUNT};

/// Errors that can occur when parsing board notation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotationError {
    #[error("expected 9 cells, got {0}")]
    WrongCellCount(usize),

    #[error("invalid cell character '{0}'")]
    InvalidCell(char),

    #[error("expected 3 rows of 3 cells separated by '/', got '{0}'")]
    MalformedRows(String),
}

/// Encodes a board as its nine-character notation.
pub fn encode_board(board: &Board) -> String {
    board.cells().iter().map(|c| c.as_char()).collect()
}

/// Parses a board from nine-character or `/`-separated row notation.
pub fn parse_board(s: &str) -> Result<Board, NotationError> {
    let s = s.trim();

    let compact: String = if s.contains('/') {
        let rows: Vec<&str> = s.split('/').collect();
        if rows.len() != 3 || rows.iter().any(|r| r.chars().count() != 3) {
            return Err(NotationError::MalformedRows(s.to_string()));
        }
        rows.concat()
    } else {
        s.to_string()
    };

    let count = compact.chars().count();
    if count != CELL_COUNT {
        return Err(NotationError::WrongCellCount(count));
    }

    let mut cells = [Cell::Empty; CELL_COUNT];
    for (slot, c) in cells.iter_mut().zip(compact.chars()) {
        *slot = Cell::from_char(c).ok_or(NotationError::InvalidCell(c))?;
    }
    Ok(Board::from_cells(cells))
}
