//! Configuration for Fauxbase

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Result;

#[derive(Clone, Deserialize)]
pub struct Config {
    /// Database host
    #[serde(default = "default_host")]
    pub host: String,

    /// Database port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Database user
    #[serde(default = "default_user")]
    pub user: String,

    /// Database password; never exposed through status output or logs
    #[serde(default = "default_password")]
    pub password: String,

    /// Database name
    #[serde(default = "default_database")]
    pub database: String,

    /// Simulated connect latency in milliseconds
    #[serde(default = "default_connect_delay_ms")]
    pub connect_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            user: default_user(),
            password: default_password(),
            database: default_database(),
            connect_delay_ms: default_connect_delay_ms(),
        }
    }
}

impl Config {
    /// Load config from the default location, or fall back to defaults
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Config::default()),
        }
    }

    /// Load config from a specific TOML file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Default config path (<config dir>/fauxbase/config.toml)
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("fauxbase").join("config.toml"))
    }

    /// Connection endpoint as host:port
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Simulated connect latency
    pub fn connect_delay(&self) -> Duration {
        Duration::from_millis(self.connect_delay_ms)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("connect_delay_ms", &self.connect_delay_ms)
            .finish()
    }
}

// Default value functions

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    5432
}

fn default_user() -> String {
    "app".to_string()
}

fn default_password() -> String {
    "changeme".to_string()
}

fn default_database() -> String {
    "appdb".to_string()
}

fn default_connect_delay_ms() -> u64 {
    500
}
