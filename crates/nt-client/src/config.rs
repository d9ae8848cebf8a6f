//! Client configuration
//!
//! Loaded from an optional TOML file. Every field has a default, so a
//! partial file (or none at all) is fine.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Time between frames of the driver loop.
    pub frame_interval_ms: u64,
    /// Messages kept in the log history.
    pub message_capacity: usize,
    /// Messages shown under the map.
    pub status_lines: usize,
    /// Storage key the game is saved under.
    pub save_key: String,
    /// Start with stats already assigned instead of the creation overlay.
    pub skip_character_creation: bool,
    /// Restore the saved game on startup, if there is one.
    pub restore_on_start: bool,
    pub automove: AutomoveConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AutomoveConfig {
    /// Delay before a scheduled step runs.
    pub delay_ms: u64,
    /// Drop a scheduled step when the player moves by hand.
    pub cancel_on_manual_input: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: 50,
            message_capacity: 64,
            status_lines: 3,
            save_key: "neon_twilight".to_string(),
            skip_character_creation: false,
            restore_on_start: false,
            automove: AutomoveConfig::default(),
        }
    }
}

impl Default for AutomoveConfig {
    fn default() -> Self {
        Self {
            delay_ms: 1000,
            cancel_on_manual_input: false,
        }
    }
}

impl ClientConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load from `path`; a missing file gives the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml_str(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms.max(1))
    }

    pub fn automove_delay(&self) -> Duration {
        Duration::from_millis(self.automove.delay_ms)
    }
}
