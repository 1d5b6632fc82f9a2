use crate::level::Level;
use serde::{Deserialize, Serialize};

/// Settings of the tutor. These are fixed at startup and passed explicitly; nothing changes them
/// afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TutorConfig {
    /// The level preselected in the form, and used when a submission names no level.
    pub default_level: Level,
}

impl TutorConfig {
    /// Creates a configuration with the given default level.
    pub fn with_default_level(default_level: Level) -> Self {
        Self { default_level }
    }
}
