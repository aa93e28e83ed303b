//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use wt_core::{DurationConfig, SuccessorPolicy};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the history export file.
    pub history_path: PathBuf,

    /// Successor policy for duration inference.
    #[serde(default)]
    pub duration_policy: SuccessorPolicy,

    /// Optional cap, in seconds, on a single page's credited duration.
    /// Unset by default: no outlier capping.
    #[serde(default)]
    pub single_page_limit_s: Option<f64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_path: PathBuf::from("inputs/history.json"),
            duration_policy: SuccessorPolicy::default(),
            single_page_limit_s: None,
        }
    }
}

impl Config {
    /// Loads configuration from default locations.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(None)
    }

    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (WT_*)
        figment = figment.merge(Env::prefixed("WT_"));

        figment.extract()
    }

    /// The duration-inference settings this configuration selects.
    pub const fn duration_config(&self) -> DurationConfig {
        DurationConfig {
            policy: self.duration_policy,
            single_page_limit_s: self.single_page_limit_s,
        }
    }
}

/// Returns the platform-specific config directory for wt.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("wt"))
}
