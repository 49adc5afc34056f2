//! Board representation.
//!
//! A board is a fixed 3×3 array of cells in row-major order. Boards are
//! `Copy` values: playing a move yields a new board and leaves the old one
//! untouched, which is what lets the game history hold immutable snapshots.

use serde::Serialize;

use super::mark::{Cell, Mark};

/// Number of cells on the board.
pub const CELL_COUNT: usize = 9;

/// A complete 3×3 board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Board {
    cells: [Cell; CELL_COUNT],
}

impl Board {
    /// Creates an empty board.
    pub const fn empty() -> Self {
        Board {
            cells: [Cell::Empty; CELL_COUNT],
        }
    }

    /// Creates a board from its nine cells.
    pub const fn from_cells(cells: [Cell; CELL_COUNT]) -> Self {
        Board { cells }
    }

    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Returns the cell at `index`, or `None` when the index is off the board.
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Returns a copy of this board with `mark` written at `index`.
    ///
    /// Overwrites whatever was there. Returns `None` when the index is off
    /// the board.
    pub fn with_mark(&self, index: usize, mark: Mark) -> Option<Board> {
        if index >= CELL_COUNT {
            return None;
        }
        let mut next = *self;
        next.cells[index] = Cell::Occupied(mark);
        Some(next)
    }

    /// Indices of empty cells in ascending order.
    pub fn empty_cells(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_empty())
            .map(|(i, _)| i)
            .collect()
    }

    /// Returns true when no cell is empty.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    /// Number of cells holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|c| c.mark() == Some(mark)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_board_has_nine_empty_cells() {
        let board = Board::empty();
        assert_eq!(board.cells().len(), CELL_COUNT);
        assert!(board.cells().iter().all(|c| c.is_empty()));
        assert_eq!(board.empty_cells(), (0..9).collect::<Vec<_>>());
        assert!(!board.is_full());
    }

    #[test]
    fn with_mark_leaves_original_untouched() {
        let board = Board::empty();
        let next = board.with_mark(4, Mark::X).unwrap();
        assert_eq!(board.get(4), Some(Cell::Empty));
        assert_eq!(next.get(4), Some(Cell::Occupied(Mark::X)));
        assert_eq!(next.count(Mark::X), 1);
    }

    #[test]
    fn with_mark_overwrites() {
        let board = Board::empty().with_mark(0, Mark::X).unwrap();
        let next = board.with_mark(0, Mark::O).unwrap();
        assert_eq!(next.get(0), Some(Cell::Occupied(Mark::O)));
        assert_eq!(next.count(Mark::X), 0);
    }

    #[test]
    fn with_mark_rejects_off_board_index() {
        assert!(Board::empty().with_mark(9, Mark::X).is_none());
        assert!(Board::empty().get(9).is_none());
    }

    #[test]
    fn full_board_detected() {
        let mut board = Board::empty();
        for i in 0..CELL_COUNT {
            board = board.with_mark(i, Mark::for_ply(i)).unwrap();
        }
        assert!(board.is_full());
        assert!(board.empty_cells().is_empty());
    }
}
