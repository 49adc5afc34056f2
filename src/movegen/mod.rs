//! Move generation and the random opponent.
//!
//! A legal target is any empty cell. The opponent used in single-player mode
//! picks one of them uniformly at random; it has no lookahead.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::{Board, Mark};

/// Returns the indices of all empty cells in ascending order.
pub fn legal_moves(board: &Board) -> Vec<usize> {
    board.empty_cells()
}

/// Picks an empty cell uniformly at random. Returns `None` on a full board.
pub fn random_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<usize> {
    legal_moves(board).choose(rng).copied()
}

/// Plays `mark` on a random empty cell and returns the resulting board with
/// the chosen index. A full board comes back unchanged with no index.
pub fn play_random<R: Rng + ?Sized>(board: &Board, mark: Mark, rng: &mut R) -> (Board, Option<usize>) {
    match random_move(board, rng) {
        Some(index) => match board.with_mark(index, mark) {
            Some(next) => (next, Some(index)),
            None => (*board, None),
        },
        None => (*board, None),
    }
}
