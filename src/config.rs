//! Settings file
//!
//! ```toml
//! log_level = "debug"
//! messages = "messages.de.toml"
//!
//! [server]
//! host = "127.0.0.1"
//! port = 8080
//! cors_origin = "http://localhost:5173"
//!
//! [database]
//! path = "admin.db"
//!
//! [reports]
//! capacity = 500
//! ttl_secs = 60
//! ```
//!
//! Every key is optional. Command line flags take precedence.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::i18n::Messages;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub log_level: Option<String>,
    /// Message bundle overriding the built-in texts
    pub messages: Option<PathBuf>,
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub reports: ReportSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub cors_origin: Option<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            cors_origin: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub path: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: "toolkit.db".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    pub capacity: u64,
    pub ttl_secs: u64,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            capacity: 1_000,
            ttl_secs: 300,
        }
    }
}

impl ReportSettings {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Settings {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).context("Invalid settings file")
    }

    /// Settings from `path`, or the defaults when no file is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings {}", path.display()))?;
        let settings = Self::from_toml_str(&source)?;
        info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Message bundle, with the configured overrides applied
    pub fn load_messages(&self) -> Result<Messages> {
        match &self.messages {
            Some(path) => Messages::load_with_overrides(path),
            None => Ok(Messages::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.database.path, "toolkit.db");
        assert_eq!(settings.reports.ttl(), Duration::from_secs(300));
    }

    #[test]
    fn test_partial_sections() {
        let settings = Settings::from_toml_str(
            r#"
log_level = "debug"

[server]
port = 8080

[reports]
ttl_secs = 5
"#,
        )
        .unwrap();

        assert_eq!(settings.log_level.as_deref(), Some("debug"));
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.reports.capacity, 1_000);
        assert_eq!(settings.reports.ttl_secs, 5);
    }

    #[test]
    fn test_unknown_types_are_rejected() {
        assert!(Settings::from_toml_str("[server]\nport = \"eighty\"").is_err());
    }

    #[test]
    fn test_load_without_path() {
        assert_eq!(Settings::load(None).unwrap(), Settings::default());
    }
}
