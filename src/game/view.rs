//! Presentation snapshot.
//!
//! Everything a front end needs to draw the game, recomputed from the state
//! machine after every change.

use serde::Serialize;

use crate::board::Board;

use super::settings::{Mode, Theme};
use super::state::Game;

/// One row of the move list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryItem {
    pub move_number: usize,
    pub label: String,
}

impl HistoryItem {
    pub fn new(move_number: usize) -> Self {
        let label = if move_number == 0 {
            "Start".to_string()
        } else {
            format!("Move #{move_number}")
        };
        HistoryItem { move_number, label }
    }
}

/// A read-only view of the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameView {
    pub board: Board,
    pub status: String,
    pub winning_line: Option<[usize; 3]>,
    pub current_move: usize,
    pub history: Vec<HistoryItem>,
    pub time_left: u32,
    pub score_x: u32,
    pub score_o: u32,
    pub theme: Theme,
    pub mode: Mode,
}

impl Game {
    /// The move list: "Start" for the empty board, then "Move #n".
    pub fn history_list(&self) -> Vec<HistoryItem> {
        (0..self.history().len()).map(HistoryItem::new).collect()
    }

    pub fn view(&self) -> GameView {
        let scores = self.scores();
        GameView {
            board: *self.board(),
            status: self.status_text(),
            winning_line: self.winning_line(),
            current_move: self.current_move(),
            history: self.history_list(),
            time_left: self.time_left(),
            score_x: scores.x,
            score_o: scores.o,
            theme: self.theme(),
            mode: self.mode(),
        }
    }
}
