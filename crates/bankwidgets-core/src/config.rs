//! Client configuration.
//!
//! Values are layered: built-in defaults, then an optional JSON file, then
//! environment variables. Binaries apply their command-line flags last.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{WidgetError, WidgetResult};
use crate::resources::StringResources;

/// Environment variable overriding [`ClientConfig::base_url`].
pub const ENV_BASE_URL: &str = "BANKWIDGETS_BASE_URL";
/// Environment variable overriding [`ClientConfig::timeout_secs`].
pub const ENV_TIMEOUT_SECS: &str = "BANKWIDGETS_TIMEOUT_SECS";

/// Settings shared by the desktop app and the CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend origin, e.g. `https://bank.example.com`
    pub base_url: String,
    /// Per-request timeout
    pub timeout_secs: u64,
    /// Maximum number of upcoming transfers shown in the preview
    pub preview_limit: usize,
    /// Pause between closing the verification modal and refreshing accounts
    pub success_refresh_delay_ms: u64,
    /// Optional JSON object of string resource overrides
    pub strings_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout_secs: 30,
            preview_limit: crate::scheduled::PREVIEW_LIMIT,
            success_refresh_delay_ms: crate::verification::SUCCESS_REFRESH_DELAY.as_millis() as u64,
            strings_file: None,
        }
    }
}

impl ClientConfig {
    /// Default location of the config file (`<config_dir>/bankwidgets/config.json`).
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("bankwidgets")
            .join("config.json")
    }

    /// Read a config file. Missing keys fall back to defaults.
    pub fn from_file(path: impl AsRef<Path>) -> WidgetResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        serde_json::from_str(&raw)
            .map_err(|e| WidgetError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Defaults, overlaid with `path` if it exists, overlaid with the environment.
    pub fn load(path: Option<&Path>) -> WidgetResult<Self> {
        let mut config = match path {
            Some(p) if p.exists() => Self::from_file(p)?,
            Some(p) => {
                tracing::debug!(path = %p.display(), "config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup (injectable for tests).
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> WidgetResult<()> {
        if let Some(url) = lookup(ENV_BASE_URL) {
            self.base_url = url;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            self.timeout_secs = raw.trim().parse().map_err(|_| {
                WidgetError::Config(format!("{} must be a whole number, got '{}'", ENV_TIMEOUT_SECS, raw))
            })?;
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn success_refresh_delay(&self) -> Duration {
        Duration::from_millis(self.success_refresh_delay_ms)
    }

    /// String resources with this config's overrides applied.
    pub fn strings(&self) -> WidgetResult<StringResources> {
        StringResources::load(self.strings_file.as_deref())
    }
}
