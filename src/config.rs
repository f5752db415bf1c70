//! Layered configuration.
//!
//! Settings come from an optional TOML file, overridden by environment
//! variables prefixed with `HEALTHWATCH_`, overridden in turn by CLI flags.
//!
//! ```toml
//! refresh_secs = 2
//! data_file = "sites.json"
//!
//! [risk]
//! medium_percent = 1.0
//! high_percent = 3.0
//! critical_percent = 6.0
//! ```
//!
//! Nested keys use a double underscore in the environment, e.g.
//! `HEALTHWATCH_RISK__CRITICAL_PERCENT=5`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::data::RiskPolicy;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// How often to poll the data file, in seconds.
    pub refresh_secs: u64,
    /// JSON file of site records; the built-in data is used when unset.
    pub data_file: Option<PathBuf>,
    pub risk: RiskPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            refresh_secs: 1,
            data_file: None,
            risk: RiskPolicy::default(),
        }
    }
}

impl Settings {
    /// Load settings from an optional file plus the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        let config = builder
            .add_source(
                Environment::with_prefix("HEALTHWATCH")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?;

        let settings: Settings =
            config.try_deserialize().context("Invalid configuration values")?;
        settings.risk.validate()?;
        Ok(settings)
    }
}
