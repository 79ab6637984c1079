//! Configuration loading for the Condensate client.
//!
//! Layered config: defaults -> config file -> env vars -> CLI flags.
//! The default config file lives at ~/.config/condensate/config.toml
//! (any format the `config` crate understands).

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::CondensateError;

/// Base URL used when nothing else is configured.
pub const DEFAULT_URL: &str = "http://localhost:8000";

/// Network timeout applied to every request, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Client settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Base URL of the memory store
    #[serde(default = "default_url")]
    pub url: String,

    /// Bearer credential; empty means unauthenticated
    #[serde(default)]
    pub api_key: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Default project for commands that need one
    #[serde(default)]
    pub project_id: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_url() -> String {
    DEFAULT_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            url: default_url(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
            project_id: None,
            log_level: default_log_level(),
        }
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("url", &self.url)
            .field(
                "api_key",
                &if self.api_key.is_empty() {
                    "(not set)"
                } else {
                    "***"
                },
            )
            .field("timeout_secs", &self.timeout_secs)
            .field("project_id", &self.project_id)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl Settings {
    /// Load settings with layered precedence:
    /// 1. Built-in defaults
    /// 2. Config file (~/.config/condensate/config.toml)
    /// 3. CLI-specified config file (optional)
    /// 4. Environment variables (CONDENSATE_URL, CONDENSATE_API_KEY, ...)
    ///
    /// CLI flags should be applied by the caller after this returns.
    pub fn load(cli_config_path: Option<&str>) -> Result<Self, CondensateError> {
        let config_dir = ProjectDirs::from("", "", "condensate")
            .map(|p| p.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        Self::load_from(&config_dir.join("config"), cli_config_path)
    }

    /// Same as [`Settings::load`] with an explicit default config file stem.
    pub fn load_from(
        default_config_path: &Path,
        cli_config_path: Option<&str>,
    ) -> Result<Self, CondensateError> {
        let mut builder = Config::builder()
            .set_default("url", default_url())
            .map_err(|e| CondensateError::Config(e.to_string()))?
            .set_default("api_key", String::new())
            .map_err(|e| CondensateError::Config(e.to_string()))?
            .set_default("timeout_secs", default_timeout_secs() as i64)
            .map_err(|e| CondensateError::Config(e.to_string()))?
            .set_default("log_level", default_log_level())
            .map_err(|e| CondensateError::Config(e.to_string()))?
            .add_source(File::with_name(&default_config_path.to_string_lossy()).required(false));

        if let Some(path) = cli_config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // Keys keep their underscores: CONDENSATE_API_KEY -> api_key
        builder = builder.add_source(
            Environment::with_prefix("CONDENSATE")
                .prefix_separator("_")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| CondensateError::Config(e.to_string()))?;

        let settings: Settings = config
            .try_deserialize()
            .map_err(|e| CondensateError::Config(e.to_string()))?;

        settings.validate().map_err(CondensateError::Config)?;
        Ok(settings)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.url.trim().is_empty() {
            return Err("url must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be > 0".to_string());
        }
        Ok(())
    }

    /// Request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
