//! Configuration file support.
//!
//! The config is a TOML file; every field has a default, so a missing
//! section or an empty file is valid.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::store::USERS_KEY;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub store: StoreConfig,
    pub display: DisplayConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// JSON document holding the user list
    pub path: PathBuf,
    /// Document key of the user list
    pub key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("users.json"),
            key: USERS_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub color: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// How long a session waits for a user load to reach the grid
    pub load_timeout_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            load_timeout_ms: 5000,
        }
    }
}

impl SessionConfig {
    pub fn load_timeout(&self) -> Duration {
        Duration::from_millis(self.load_timeout_ms)
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse config from TOML content
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Default config location, `<config dir>/wonders/config.toml`.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wonders")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.store.key, "users");
        assert_eq!(config.store.path, PathBuf::from("users.json"));
        assert!(config.display.color);
        assert_eq!(config.session.load_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_partial_config() {
        let content = r#"
[store]
path = "/tmp/league.json"

[display]
color = false
"#;
        let config = Config::parse(content).unwrap();
        assert_eq!(config.store.path, PathBuf::from("/tmp/league.json"));
        assert_eq!(config.store.key, "users");
        assert!(!config.display.color);
        assert_eq!(config.session.load_timeout_ms, 5000);
    }

    #[test]
    fn test_invalid_config() {
        let result = Config::parse("[display]\ncolor = \"yes\"\n");
        assert!(matches!(result, Err(Error::ConfigParseError(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(dir.path().join("missing.toml"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_default_path_file_name() {
        assert!(Config::default_path().ends_with("wonders/config.toml"));
    }
}
