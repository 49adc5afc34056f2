//! Engine state management.
//!
//! Holds the current game, the engine options and the RNG driving the
//! computer seat, and turns protocol commands into state-machine calls.
//! Every state change is answered with the queued events and a fresh view.

use std::collections::HashMap;
use std::io::{self, Write};

use log::{info, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::config::{EngineConfig, MAX_TURN_SECONDS};
use crate::game::{Game, TickOutcome};
use crate::protocol::{write_events, write_snapshot, write_view};

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    game: Game,
    pub options: HashMap<String, String>,
    rng: SmallRng,
}

/// Seeds from `seed`, or from entropy when it is absent or zero.
fn seeded_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) if s != 0 => SmallRng::seed_from_u64(s),
        _ => SmallRng::from_entropy(),
    }
}

impl Engine {
    /// Creates an engine with a fresh game configured from `config`.
    pub fn new(config: &EngineConfig) -> Self {
        let mut game = Game::with_turn_seconds(config.turn_seconds);
        game.set_mode(config.mode);
        game.set_theme(config.theme);
        game.drain_events();
        Engine {
            game,
            options: HashMap::new(),
            rng: seeded_rng(config.seed),
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// The game's clock epoch. The driver re-arms its tick when this changes.
    pub fn epoch(&self) -> u64 {
        self.game.epoch()
    }

    /// Replaces the game with a new one, clearing the tally. Mode, theme and
    /// turn length carry over.
    pub fn new_game(&mut self) {
        let old = &self.game;
        let mut game = Game::with_turn_seconds(old.turn_seconds());
        game.set_mode(old.mode());
        game.set_theme(old.theme());
        game.drain_events();
        self.game = game;
        info!("new game");
    }

    /// Sets an engine option. Known options take effect immediately.
    pub fn set_option(&mut self, name: String, value: Option<String>) {
        let value = value.unwrap_or_default();
        match name.as_str() {
            "TurnSeconds" => match value.parse::<u32>() {
                Ok(secs) if (1..=MAX_TURN_SECONDS).contains(&secs) => {
                    self.game.set_turn_seconds(secs);
                }
                _ => {
                    warn!("setoption TurnSeconds: invalid value '{}'", value);
                    return;
                }
            },
            "Seed" => match value.parse::<u64>() {
                Ok(seed) => self.rng = seeded_rng(Some(seed)),
                Err(_) => {
                    warn!("setoption Seed: invalid value '{}'", value);
                    return;
                }
            },
            other => warn!("setoption: unknown option '{}' stored without effect", other),
        }
        self.options.insert(name, value);
    }

    /// Handles the handshake: writes id, options, protocol_version, and hellook.
    pub fn handle_hello<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "id name tictactoe")?;
        writeln!(out, "id author tictactoe")?;
        writeln!(
            out,
            "option name TurnSeconds type spin default {} min 1 max {}",
            self.game.turn_seconds(),
            MAX_TURN_SECONDS
        )?;
        writeln!(out, "option name Seed type spin default 0 min 0 max {}", u64::MAX)?;
        writeln!(out, "protocol_version 1")?;
        writeln!(out, "hellook")?;
        out.flush()
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    /// Handles a cell click. Off-board cells are ignored.
    pub fn handle_click<W: Write>(&mut self, index: usize, out: &mut W) -> io::Result<()> {
        match self.game.apply_move(index) {
            Ok(_) => self.write_update(out),
            Err(e) => {
                warn!("click: {}", e);
                Ok(())
            }
        }
    }

    /// Handles a history jump. Moves outside the history are ignored.
    pub fn handle_jump<W: Write>(&mut self, to: usize, out: &mut W) -> io::Result<()> {
        match self.game.jump_to(to) {
            Ok(()) => self.write_update(out),
            Err(e) => {
                warn!("jump: {}", e);
                Ok(())
            }
        }
    }

    pub fn handle_reset<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        self.game.reset();
        self.write_update(out)
    }

    pub fn handle_theme<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        self.game.toggle_theme();
        self.write_update(out)
    }

    pub fn handle_mode<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        self.game.toggle_mode();
        self.write_update(out)
    }

    /// Advances the clock by one second and reports the result.
    pub fn handle_tick<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        if let TickOutcome::ComputerMoved(m) = self.game.tick(&mut self.rng) {
            if m.scored {
                info!("computer won as {}", m.mark);
            }
        }
        self.write_update(out)
    }

    pub fn handle_newgame<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        self.new_game();
        self.write_update(out)
    }

    /// Writes the view without changing anything.
    pub fn handle_show<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write_view(out, &self.game.view())?;
        out.flush()
    }

    pub fn handle_snapshot<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write_snapshot(out, &self.game.view())?;
        out.flush()
    }

    /// Writes queued events followed by the view.
    fn write_update<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        write_events(out, self.game.drain_events())?;
        write_view(out, &self.game.view())?;
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Mark;
    use crate::game::{Mode, Theme};

    fn engine() -> Engine {
        Engine::new(&EngineConfig {
            seed: Some(11),
            ..EngineConfig::default()
        })
    }

    fn output<F>(f: F) -> Vec<String>
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap().lines().map(str::to_string).collect()
    }

    #[test]
    fn new_engine_uses_config() {
        let engine = Engine::new(&EngineConfig {
            turn_seconds: 4,
            mode: Mode::Single,
            theme: Theme::Dark,
            ..EngineConfig::default()
        });
        assert_eq!(engine.game().time_left(), 4);
        assert_eq!(engine.game().mode(), Mode::Single);
        assert_eq!(engine.game().theme(), Theme::Dark);
        assert!(engine.options.is_empty());
    }

    #[test]
    fn handle_hello_outputs_handshake() {
        let engine = engine();
        let lines = output(|out| engine.handle_hello(out));
        assert_eq!(lines[0], "id name tictactoe");
        assert!(lines.iter().any(|l| l.starts_with("option name TurnSeconds")));
        assert_eq!(lines[lines.len() - 2], "protocol_version 1");
        assert_eq!(lines.last().unwrap(), "hellook");
    }

    #[test]
    fn handle_isready_outputs_readyok() {
        let engine = engine();
        assert_eq!(output(|out| engine.handle_isready(out)), vec!["readyok"]);
    }

    #[test]
    fn click_writes_event_and_view() {
        let mut engine = engine();
        let lines = output(|out| engine.handle_click(4, out));
        assert_eq!(lines[0], "event move 4 X");
        assert_eq!(lines[1], "board ....X....");
        assert!(lines.contains(&"status Next player: O".to_string()));
        assert_eq!(lines.last().unwrap(), "viewok");
    }

    #[test]
    fn off_board_click_writes_nothing() {
        let mut engine = engine();
        assert!(output(|out| engine.handle_click(9, out)).is_empty());
        assert_eq!(engine.game().history().len(), 1);
    }

    #[test]
    fn bad_jump_writes_nothing() {
        let mut engine = engine();
        assert!(output(|out| engine.handle_jump(3, out)).is_empty());
    }

    #[test]
    fn set_option_turn_seconds() {
        let mut engine = engine();
        engine.set_option("TurnSeconds".to_string(), Some("3".to_string()));
        assert_eq!(engine.options.get("TurnSeconds"), Some(&"3".to_string()));
        engine.handle_reset(&mut io::sink()).unwrap();
        assert_eq!(engine.game().time_left(), 3);
    }

    #[test]
    fn set_option_rejects_bad_turn_seconds() {
        let mut engine = engine();
        engine.set_option("TurnSeconds".to_string(), Some("0".to_string()));
        engine.set_option("TurnSeconds".to_string(), Some("soon".to_string()));
        assert!(engine.options.is_empty());
        assert_eq!(engine.game().turn_seconds(), 10);
    }

    #[test]
    fn single_player_computer_moves_on_timeout() {
        let mut engine = engine();
        engine.handle_mode(&mut io::sink()).unwrap();
        engine.handle_click(0, &mut io::sink()).unwrap();
        let mut lines = Vec::new();
        for _ in 0..10 {
            lines = output(|out| engine.handle_tick(out));
        }
        assert!(lines.iter().any(|l| l.starts_with("event move ") && l.ends_with(" O computer")));
        assert!(lines.contains(&"timer 10".to_string()));
        assert_eq!(engine.game().current_move(), 2);
        assert_eq!(engine.game().board().count(Mark::O), 1);
    }

    #[test]
    fn newgame_clears_tally_keeps_flags() {
        let mut engine = engine();
        engine.handle_theme(&mut io::sink()).unwrap();
        for i in [0, 3, 1, 4, 2] {
            engine.handle_click(i, &mut io::sink()).unwrap();
        }
        assert_eq!(engine.game().scores().x, 1);
        let lines = output(|out| engine.handle_newgame(out));
        assert!(!lines.iter().any(|l| l.starts_with("event ")));
        assert!(lines.contains(&"score 0 0".to_string()));
        assert!(lines.contains(&"theme dark".to_string()));
    }

    #[test]
    fn epoch_tracks_clock_changes() {
        let mut engine = engine();
        let before = engine.epoch();
        engine.handle_show(&mut io::sink()).unwrap();
        assert_eq!(engine.epoch(), before);
        engine.handle_tick(&mut io::sink()).unwrap();
        assert_ne!(engine.epoch(), before);
    }
}
