//! Player mode and display theme.

use serde::{Deserialize, Serialize};

/// Who drives the O seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Both seats are human.
    #[default]
    Double,
    /// Seat O is played by the random opponent when its clock runs out.
    Single,
}

impl Mode {
    pub const fn toggled(self) -> Mode {
        match self {
            Mode::Double => Mode::Single,
            Mode::Single => Mode::Double,
        }
    }

    /// Returns the protocol name of this mode.
    pub const fn name(self) -> &'static str {
        match self {
            Mode::Double => "double",
            Mode::Single => "single",
        }
    }

    pub fn from_name(name: &str) -> Option<Mode> {
        match name {
            "double" => Some(Mode::Double),
            "single" => Some(Mode::Single),
            _ => None,
        }
    }
}

/// Display theme. Has no effect on play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub const fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Returns the protocol name of this theme.
    pub const fn name(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn from_name(name: &str) -> Option<Theme> {
        match name {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggles_are_involutions() {
        assert_eq!(Mode::Double.toggled(), Mode::Single);
        assert_eq!(Mode::Double.toggled().toggled(), Mode::Double);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
    }

    #[test]
    fn names_roundtrip() {
        for m in [Mode::Double, Mode::Single] {
            assert_eq!(Mode::from_name(m.name()), Some(m));
        }
        for t in [Theme::Light, Theme::Dark] {
            assert_eq!(Theme::from_name(t.name()), Some(t));
        }
        assert_eq!(Mode::from_name("triple"), None);
        assert_eq!(Theme::from_name("sepia"), None);
    }

    #[test]
    fn defaults() {
        assert_eq!(Mode::default(), Mode::Double);
        assert_eq!(Theme::default(), Theme::Light);
    }
}
