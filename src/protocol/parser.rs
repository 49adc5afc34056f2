//! Command parser.
//!
//! Parses incoming protocol lines from the front end into structured
//! `Command` variants that the engine main loop can dispatch on.

use log::warn;

/// A parsed front-end-to-engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start the protocol handshake.
    Hello,

    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Start a brand-new game, clearing the win tally.
    NewGame,

    /// A cell was clicked: `click <0-8>`.
    Click { index: usize },

    /// A history entry was selected: `jump <move>`.
    Jump { to: usize },

    /// Clear the board and history, keeping the tally.
    Reset,

    /// Flip between light and dark.
    Theme,

    /// Flip between single- and two-player.
    Mode,

    /// One second elapsed on a manual clock.
    Tick,

    /// Write the current view.
    Show,

    /// Write the current view as JSON.
    Snapshot,

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging.
pub fn parse_command(line: &str) -> Option<Command> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let first = *tokens.first()?;

    match first {
        "hello" => Some(Command::Hello),
        "isready" => Some(Command::IsReady),
        "quit" => Some(Command::Quit),
        "newgame" => Some(Command::NewGame),
        "reset" => Some(Command::Reset),
        "theme" => Some(Command::Theme),
        "mode" => Some(Command::Mode),
        "tick" => Some(Command::Tick),
        "show" => Some(Command::Show),
        "snapshot" => Some(Command::Snapshot),

        "setoption" => parse_setoption(&tokens),
        "click" => parse_index(&tokens).map(|index| Command::Click { index }),
        "jump" => parse_index(&tokens).map(|to| Command::Jump { to }),

        other => {
            warn!("unknown command: {}", other);
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 3 || tokens[1] != "name" {
        warn!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    let value_idx = tokens.iter().position(|&t| t == "value");

    let (name, value) = match value_idx {
        Some(vi) => {
            let name_parts = &tokens[2..vi];
            let value_parts = &tokens[vi + 1..];
            if name_parts.is_empty() {
                warn!("malformed setoption: empty name");
                return None;
            }
            let value = if value_parts.is_empty() {
                None
            } else {
                Some(value_parts.join(" "))
            };
            (name_parts.join(" "), value)
        }
        None => (tokens[2..].join(" "), None),
    };

    Some(Command::SetOption { name, value })
}

/// Parses the single numeric argument of `click` and `jump`.
///
/// Range is not checked here; the game rejects indices it cannot use.
fn parse_index(tokens: &[&str]) -> Option<usize> {
    if tokens.len() != 2 {
        warn!("malformed {}: expected '{} <n>'", tokens[0], tokens[0]);
        return None;
    }
    match tokens[1].parse::<usize>() {
        Ok(n) => Some(n),
        Err(_) => {
            warn!("invalid {} argument: '{}'", tokens[0], tokens[1]);
            None
        }
    }
}
