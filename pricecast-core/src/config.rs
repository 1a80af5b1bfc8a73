//! Serializable engine configuration.
//!
//! Every field has a default, so an empty TOML document is a valid config:
//!
//! ```toml
//! history_days = 365
//! forecast_days = 30
//! history_base_factor = 0.9
//! symbol_policy = "lenient"
//! indicator_mode = "placeholder"
//! seed = 42
//!
//! [chart]
//! historical_window = 90
//! forecast_window = 30
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("serialize config TOML: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// What to do when a requested symbol is not in the catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolPolicy {
    /// Substitute the catalog's first entry and flag the snapshot.
    #[default]
    Lenient,
    /// Fail with `EngineError::UnknownSymbol`.
    Strict,
}

/// How the snapshot's indicator surface is produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorMode {
    /// Fixed perturbations of the current price plus random oscillators.
    #[default]
    Placeholder,
    /// Computed from the synthesized historical closes.
    Computed,
}

/// Chart window sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartWindows {
    /// Most recent historical points shown.
    pub historical_window: usize,
    /// Leading forecast points shown.
    pub forecast_window: usize,
}

impl Default for ChartWindows {
    fn default() -> Self {
        Self {
            historical_window: 90,
            forecast_window: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub history_days: usize,
    pub forecast_days: usize,
    /// Starting price of the historical walk as a fraction of the base price.
    pub history_base_factor: f64,
    pub symbol_policy: SymbolPolicy,
    pub indicator_mode: IndicatorMode,
    /// Master seed; `None` draws from OS entropy.
    pub seed: Option<u64>,
    pub chart: ChartWindows,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_days: 365,
            forecast_days: 30,
            history_base_factor: 0.9,
            symbol_policy: SymbolPolicy::default(),
            indicator_mode: IndicatorMode::default(),
            seed: None,
            chart: ChartWindows::default(),
        }
    }
}

impl EngineConfig {
    /// Load and validate a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_days == 0 {
            return Err(ConfigError::Invalid("history_days must be > 0".into()));
        }
        if self.forecast_days == 0 {
            return Err(ConfigError::Invalid("forecast_days must be > 0".into()));
        }
        if !(self.history_base_factor.is_finite() && self.history_base_factor > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "history_base_factor must be positive, got {}",
                self.history_base_factor
            )));
        }
        let ChartWindows {
            historical_window,
            forecast_window,
        } = self.chart;
        if historical_window == 0 || forecast_window == 0 {
            return Err(ConfigError::Invalid("chart windows must be > 0".into()));
        }
        if historical_window > self.history_days {
            return Err(ConfigError::Invalid(format!(
                "chart.historical_window ({historical_window}) exceeds history_days ({})",
                self.history_days
            )));
        }
        if forecast_window > self.forecast_days {
            return Err(ConfigError::Invalid(format!(
                "chart.forecast_window ({forecast_window}) exceeds forecast_days ({})",
                self.forecast_days
            )));
        }
        Ok(())
    }
}
