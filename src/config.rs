use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

/// Library configuration module
/// Holds the options handed to format adapters and the log level of
/// applications using the bundled logger.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Options forwarded to format adapters when parsing
    #[serde(default)]
    pub options: FormatOptions,
}

/// Format-specific parse options
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct FormatOptions {
    /// Teletext (`.ts`) options
    #[serde(default)]
    pub teletext: TeletextOptions,
}

/// Teletext extraction options
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct TeletextOptions {
    /// Magazine/page number to extract (100-899)
    #[serde(default)]
    pub page: Option<u16>,

    /// Elementary stream id carrying the teletext data
    #[serde(default)]
    pub stream_id: Option<u16>,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

// Valid teletext page range
const TELETEXT_PAGES: std::ops::RangeInclusive<u16> = 100..=899;

impl Config {
    /// Parse a configuration from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json).context("Failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Validate the configuration for consistency
    pub fn validate(&self) -> Result<()> {
        if let Some(page) = self.options.teletext.page {
            if !TELETEXT_PAGES.contains(&page) {
                return Err(anyhow!("Teletext page {} is outside 100-899", page));
            }
        }
        Ok(())
    }
}
