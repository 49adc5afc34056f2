//! Engine configuration.
//!
//! Each setting comes from a command-line flag, then an environment
//! variable, then a default.

use std::ffi::OsString;
use std::time::Duration;

use pico_args::Arguments;
use thiserror::Error;

use crate::game::{Mode, Theme, TICK_INTERVAL, TURN_SECONDS};

/// Longest turn the engine accepts, in seconds.
pub const MAX_TURN_SECONDS: u32 = 3600;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}")]
    InvalidValue { key: String, value: String },

    #[error("turn length must be between 1 and 3600 seconds, got {0}")]
    TurnSecondsOutOfRange(u32),

    #[error(transparent)]
    Args(#[from] pico_args::Error),

    #[error("unexpected arguments: {0:?}")]
    Unexpected(Vec<OsString>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Seconds per turn before the clock expires.
    pub turn_seconds: u32,
    /// Wall-clock interval between ticks. `None` runs without a clock, so
    /// time only passes on explicit `tick` commands.
    pub tick_interval: Option<Duration>,
    /// RNG seed for the computer seat. `None` seeds from entropy.
    pub seed: Option<u64>,
    pub mode: Mode,
    pub theme: Theme,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            turn_seconds: TURN_SECONDS,
            tick_interval: Some(TICK_INTERVAL),
            seed: None,
            mode: Mode::default(),
            theme: Theme::default(),
        }
    }
}

impl EngineConfig {
    /// Reads configuration from the process arguments and environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut args = Arguments::from_env();
        let config = Self::from_sources(&mut args, |key| std::env::var(key).ok())?;
        let rest = args.finish();
        if !rest.is_empty() {
            return Err(ConfigError::Unexpected(rest));
        }
        Ok(config)
    }

    /// Reads configuration from `args`, falling back to `env` for values
    /// not given as flags.
    pub fn from_sources<F>(args: &mut Arguments, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = EngineConfig::default();

        if let Some(secs) = flag_or_env::<u32, _>(args, "--turn-seconds", "TTT_TURN_SECONDS", &env)? {
            config.turn_seconds = secs;
        }
        if let Some(ms) = flag_or_env::<u64, _>(args, "--tick-ms", "TTT_TICK_MS", &env)? {
            config.tick_interval = if ms == 0 {
                None
            } else {
                Some(Duration::from_millis(ms))
            };
        }
        config.seed = flag_or_env::<u64, _>(args, "--seed", "TTT_SEED", &env)?;

        if args.contains("--single") {
            config.mode = Mode::Single;
        }
        if args.contains("--dark") {
            config.theme = Theme::Dark;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.turn_seconds == 0 || self.turn_seconds > MAX_TURN_SECONDS {
            return Err(ConfigError::TurnSecondsOutOfRange(self.turn_seconds));
        }
        Ok(())
    }
}

/// Parses a flag value, falling back to an environment variable.
fn flag_or_env<T, F>(
    args: &mut Arguments,
    flag: &'static str,
    key: &str,
    env: &F,
) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = args.opt_value_from_str(flag)? {
        return Ok(Some(v));
    }
    match env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value: raw,
            }),
        None => Ok(None),
    }
}
