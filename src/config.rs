//! Tracker and report configuration
//!
//! Every key is optional; missing keys take the defaults below.
//!
//! # Example TOML
//! ```toml
//! [tracker]
//! precision = 5
//!
//! [report]
//! display_precision = 4
//! include_statistics = true
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default number of decimal digits kept for captured clock readings
pub const DEFAULT_PRECISION: u32 = 5;

/// Default number of decimal digits shown in statistics
pub const DEFAULT_DISPLAY_PRECISION: u32 = 4;

/// Constructor-time tracker settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Decimal digits used to round every captured time value
    pub precision: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
        }
    }
}

/// Per-call settings for statistics, reports and plot data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportOptions {
    /// Decimal digits for mean/median/max/min
    pub display_precision: u32,
    /// Attach the session summary to plot requests
    pub include_statistics: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            display_precision: DEFAULT_DISPLAY_PRECISION,
            include_statistics: false,
        }
    }
}

/// Complete configuration file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tracker: TrackerConfig,
    pub report: ReportOptions,
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse tmark configuration")
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).with_context(|| {
            format!("Failed to read config file: {}", path.as_ref().display())
        })?;
        Self::from_toml_str(&content)
    }

    /// Load from `path` when given, defaults otherwise
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}
