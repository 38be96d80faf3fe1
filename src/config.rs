//! Runtime configuration
//!
//! Built-in defaults, overridden by `WEATHER_GUIDANCE_*` environment variables
//! (for example `WEATHER_GUIDANCE_DEFAULT_WINDOW_HOURS=24`).

use anyhow::{Context, Result};
use config::{Config, Environment, Source};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_LOG_FILTER, DEFAULT_WINDOW_HOURS, ENV_PREFIX, MAX_WINDOW_HOURS};
use crate::error::GuidanceError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuidanceConfig {
    /// Window for the detailed statistics when a request does not name one
    #[serde(default = "default_window_hours")]
    pub default_window_hours: usize,
    /// Recompute apparent temperatures unless a request says otherwise
    #[serde(default)]
    pub resolve_apparent_by_default: bool,
    /// Tracing filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_window_hours() -> usize {
    DEFAULT_WINDOW_HOURS
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

impl Default for GuidanceConfig {
    fn default() -> Self {
        Self {
            default_window_hours: default_window_hours(),
            resolve_apparent_by_default: false,
            log_filter: default_log_filter(),
        }
    }
}

impl GuidanceConfig {
    /// Load configuration from the environment
    pub fn load() -> Result<Self> {
        Self::load_from(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
    }

    /// Load configuration from a single source on top of the defaults
    pub fn load_from<S>(source: S) -> Result<Self>
    where
        S: Source + Send + Sync + 'static,
    {
        let settings = Config::builder()
            .add_source(source)
            .build()
            .context("Failed to build configuration")?;

        let config: GuidanceConfig = settings
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), GuidanceError> {
        if !(1..=MAX_WINDOW_HOURS).contains(&self.default_window_hours) {
            return Err(GuidanceError::config(format!(
                "default_window_hours must be between 1 and {MAX_WINDOW_HOURS}, got {}",
                self.default_window_hours
            )));
        }
        if self.log_filter.trim().is_empty() {
            return Err(GuidanceError::config("log_filter cannot be empty"));
        }
        Ok(())
    }
}
