//! Frontend configuration
//!
//! One TOML file holds both the client settings and the few that only the
//! terminal frontend cares about:
//!
//! ```toml
//! frame_interval_ms = 50
//! save_key = "neon_twilight"
//! light_theme = true
//! storage_dir = "/tmp/neon"
//!
//! [automove]
//! delay_ms = 500
//! ```

use std::path::{Path, PathBuf};

use nt_client::ClientConfig;
use nt_client::error::ConfigError;
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    #[serde(flatten)]
    pub client: ClientConfig,
    /// `None` means detect from the terminal.
    pub light_theme: Option<bool>,
    /// Where saves go; the platform data dir when unset.
    pub storage_dir: Option<PathBuf>,
    /// Where the log file goes; the platform cache dir when unset.
    pub log_dir: Option<PathBuf>,
}

impl TuiConfig {
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

    /// `<config dir>/neon-twilight/config.toml`
    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("neon-twilight");
        path.push("config.toml");
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = TuiConfig::from_toml_str("").unwrap();
        assert_eq!(config, TuiConfig::default());
        assert_eq!(config.client, ClientConfig::default());
    }

    #[test]
    fn test_client_and_frontend_keys_share_a_file() {
        let config = TuiConfig::from_toml_str(
            r#"
            frame_interval_ms = 20
            save_key = "slot2"
            light_theme = true
            storage_dir = "/tmp/neon"

            [automove]
            delay_ms = 250
            "#,
        )
        .unwrap();
        assert_eq!(config.client.frame_interval_ms, 20);
        assert_eq!(config.client.save_key, "slot2");
        assert_eq!(config.client.automove.delay_ms, 250);
        assert_eq!(config.light_theme, Some(true));
        assert_eq!(config.storage_dir, Some(PathBuf::from("/tmp/neon")));
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn test_bad_value_is_an_error() {
        assert!(matches!(
            TuiConfig::from_toml_str("light_theme = 3"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("nt-tui-no-such-config.toml");
        assert_eq!(TuiConfig::load(&path).unwrap(), TuiConfig::default());
    }
}
