//! Dashboard configuration — API location, timeouts, display and form defaults.
//!
//! Stored as TOML. Every field is optional in the file; missing fields take
//! the defaults below.

use std::path::{Path, PathBuf};
use std::time::Duration as StdDuration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::RebalancePeriod;
use crate::form::{check_investment, FormError, DEFAULT_INVESTMENT};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_MARKET_SUFFIX: &str = ".NS";

/// Environment variable that overrides `base_url`.
pub const BASE_URL_ENV: &str = "MOMENTUM_API_URL";

/// Directory name used under the platform config and cache dirs.
pub const APP_DIR: &str = "momentum-dash";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid base_url {0:?}: must start with http:// or https://")]
    BaseUrl(String),

    #[error("invalid backtest.initial_investment: {0}")]
    Investment(FormError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    pub base_url: String,
    /// `None` waits for as long as the server takes.
    pub request_timeout_secs: Option<u64>,
    /// Stripped from symbols for display only.
    pub market_suffix: String,
    pub backtest: BacktestDefaults,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BacktestDefaults {
    pub initial_investment: f64,
    #[serde(rename = "rebalance_period_days")]
    pub rebalance_period: RebalancePeriod,
}

impl Default for BacktestDefaults {
    fn default() -> Self {
        Self {
            initial_investment: DEFAULT_INVESTMENT,
            rebalance_period: RebalancePeriod::default(),
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: None,
            market_suffix: DEFAULT_MARKET_SUFFIX.to_string(),
            backtest: BacktestDefaults::default(),
        }
    }
}

impl DashboardConfig {
    /// Load a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// `<config_dir>/momentum-dash/config.toml`, if the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Explicit path if given, else the default location when it exists,
    /// else built-in defaults. The env override is applied last.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            config.set_base_url(url)?;
        }
        Ok(config)
    }

    pub fn set_base_url(&mut self, url: impl Into<String>) -> Result<(), ConfigError> {
        self.base_url = url.into();
        self.validate()
    }

    pub fn timeout(&self) -> Option<StdDuration> {
        self.request_timeout_secs.map(StdDuration::from_secs)
    }

    /// `base_url` without a trailing slash, ready for path joining.
    pub fn api_root(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::BaseUrl(self.base_url.clone()));
        }
        check_investment(self.backtest.initial_investment).map_err(ConfigError::Investment)
    }
}
