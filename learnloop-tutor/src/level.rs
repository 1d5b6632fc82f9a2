//! Difficulty levels.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// The difficulty level a question is answered at. It only changes the header of the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Level {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    /// Every level, in the order the form lists them.
    pub const ALL: [Level; 3] = [Level::Beginner, Level::Intermediate, Level::Advanced];

    /// The label shown to the user.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Beginner => "Beginner",
            Level::Intermediate => "Intermediate",
            Level::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A string that names none of the levels.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown level `{0}`, expected one of Beginner, Intermediate, Advanced")]
pub struct ParseLevelError(pub String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::ALL.into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseLevelError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn parse_ignores_case() {
        assert_eq!("beginner".parse::<Level>(), Ok(Level::Beginner));
        assert_eq!("ADVANCED".parse::<Level>(), Ok(Level::Advanced));
        assert_eq!(" Intermediate ".parse::<Level>(), Ok(Level::Intermediate));
    }

    #[test]
    fn parse_rejects_unknown() {
        let err = "Expert".parse::<Level>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown level `Expert`, expected one of Beginner, Intermediate, Advanced",
        );
    }

    #[test]
    fn display_round_trips() {
        for level in Level::ALL {
            assert_eq!(level.to_string().parse::<Level>(), Ok(level));
        }
    }
}
