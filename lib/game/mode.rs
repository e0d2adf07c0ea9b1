use crate::chess::Color;
use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Where a participant sits in a remote game.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[serde(rename_all = "lowercase")]
pub enum Seat {
    #[display(fmt = "white")]
    White,
    #[display(fmt = "black")]
    Black,
    #[display(fmt = "spectator")]
    Spectator,
}

impl Seat {
    /// The color this seat plays, if any.
    #[inline(always)]
    pub fn color(&self) -> Option<Color> {
        match self {
            Seat::White => Some(Color::White),
            Seat::Black => Some(Color::Black),
            Seat::Spectator => None,
        }
    }
}

impl From<Color> for Seat {
    #[inline(always)]
    fn from(c: Color) -> Self {
        match c {
            Color::White => Seat::White,
            Color::Black => Seat::Black,
        }
    }
}

/// How a game is being played.
#[derive(
    Debug, Display, Default, Copy, Clone, Eq, PartialEq, Hash, From, Deserialize, Serialize,
)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[serde(deny_unknown_fields, rename_all = "lowercase")]
pub enum Mode {
    /// Both sides take turns on the same device.
    #[default]
    #[from(ignore)]
    #[display(fmt = "{}", "ron::ser::to_string(self).unwrap()")]
    Local,

    /// Each side plays from their own device through a shared room.
    #[display(fmt = "{}", "ron::ser::to_string(self).unwrap()")]
    Remote(Seat),
}

impl Mode {
    /// Whether this is a remote game.
    #[inline(always)]
    pub fn is_remote(&self) -> bool {
        matches!(self, Mode::Remote(_))
    }
}

/// The reason why parsing [`Mode`] failed.
#[derive(Debug, Display, Eq, PartialEq, Error, From)]
#[display(fmt = "failed to parse game mode")]
pub struct ParseModeError(ron::de::SpannedError);

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ron::de::from_str(s)?)
    }
}
