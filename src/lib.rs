//! Tic-tac-toe engine library.
//!
//! Exposes the board representation, rules, random opponent, game state
//! machine and protocol modules for use by integration tests and the binary
//! entry points.

pub mod board;
pub mod config;
pub mod engine;
pub mod game;
pub mod movegen;
pub mod protocol;
pub mod rules;
pub mod selfplay;
