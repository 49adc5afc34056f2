//! Output formatting.
//!
//! Writes events and the view block that follow every state change. The
//! view block always ends with `viewok` so a front end knows it has the
//! whole picture.

use std::io::{self, Write};

use crate::game::{GameEvent, GameView};

use super::notation::encode_board;

/// Writes one `event <...>` line per event.
pub fn write_events<W, I>(out: &mut W, events: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = GameEvent>,
{
    for event in events {
        writeln!(out, "event {}", event)?;
    }
    Ok(())
}

/// Writes the view block.
pub fn write_view<W: Write>(out: &mut W, view: &GameView) -> io::Result<()> {
    writeln!(out, "board {}", encode_board(&view.board))?;
    writeln!(out, "status {}", view.status)?;
    if let Some([a, b, c]) = view.winning_line {
        writeln!(out, "line {a} {b} {c}")?;
    }
    writeln!(out, "timer {}", view.time_left)?;
    writeln!(out, "score {} {}", view.score_x, view.score_o)?;
    writeln!(out, "move {}", view.current_move)?;
    for item in &view.history {
        writeln!(out, "history {} {}", item.move_number, item.label)?;
    }
    writeln!(out, "theme {}", view.theme.name())?;
    writeln!(out, "mode {}", view.mode.name())?;
    writeln!(out, "viewok")
}

/// Writes the view as a single `snapshot <json>` line.
pub fn write_snapshot<W: Write>(out: &mut W, view: &GameView) -> io::Result<()> {
    let json = serde_json::to_string(view).map_err(io::Error::other)?;
    writeln!(out, "snapshot {json}")
}
