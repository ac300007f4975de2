//! Runtime configuration for the leakage analysis service.
//!
//! Loaded from a TOML file. Every section and field is optional; a missing
//! file yields the built-in defaults. The file path comes from the
//! `LEAKMON_CONFIG` environment variable (a `.env` file is honoured by the
//! binary) and falls back to `./leakmon.toml`.
//!
//! ```toml
//! [night_window]
//! start_hour = 2
//! end_hour = 4
//!
//! [pressure]
//! threshold = 0.15
//!
//! [output]
//! report_path = "dma_leakage_report.json"
//!
//! [logging]
//! level = "info"
//! file = "leakmon.log"
//! console_timestamps = false
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::logging::LogLevel;
use crate::model::{NightWindow, DEFAULT_PRESSURE_THRESHOLD};

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "LEAKMON_CONFIG";

/// Config file used when `LEAKMON_CONFIG` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "./leakmon.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config value for {field}: {message}")]
    Invalid { field: &'static str, message: String },
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LeakmonConfig {
    pub night_window: NightWindowConfig,
    pub pressure: PressureConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NightWindowConfig {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl Default for NightWindowConfig {
    fn default() -> Self {
        let window = NightWindow::default();
        NightWindowConfig {
            start_hour: window.start_hour,
            end_hour: window.end_hour,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PressureConfig {
    /// Relative deviation from the series mean above which a sample is flagged.
    pub threshold: f64,
}

impl Default for PressureConfig {
    fn default() -> Self {
        PressureConfig {
            threshold: DEFAULT_PRESSURE_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub report_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            report_path: "dma_leakage_report.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
    pub console_timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
            file: None,
            console_timestamps: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl LeakmonConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: LeakmonConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`; a missing file gives validated defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(LeakmonConfig::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load from `$LEAKMON_CONFIG`, or `./leakmon.toml` when unset.
    pub fn load_from_env() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_ENV_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load(Path::new(&path))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = &self.night_window;
        if w.end_hour > 24 {
            return Err(ConfigError::Invalid {
                field: "night_window.end_hour",
                message: format!("{} is past midnight (max 24)", w.end_hour),
            });
        }
        if w.start_hour >= w.end_hour {
            return Err(ConfigError::Invalid {
                field: "night_window",
                message: format!("start_hour {} must be before end_hour {}", w.start_hour, w.end_hour),
            });
        }
        let t = self.pressure.threshold;
        if !t.is_finite() || t < 0.0 {
            return Err(ConfigError::Invalid {
                field: "pressure.threshold",
                message: format!("{} must be a finite, non-negative ratio", t),
            });
        }
        self.log_level()?;
        Ok(())
    }

    pub fn night_window(&self) -> NightWindow {
        NightWindow {
            start_hour: self.night_window.start_hour,
            end_hour: self.night_window.end_hour,
        }
    }

    pub fn log_level(&self) -> Result<LogLevel, ConfigError> {
        self.logging
            .level
            .parse()
            .map_err(|message| ConfigError::Invalid { field: "logging.level", message })
    }

    /// Log the effective configuration.
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!(
            "  night window   : [{:02}:00, {:02}:00)",
            self.night_window.start_hour,
            self.night_window.end_hour
        );
        tracing::info!("  pressure thr.  : {}", self.pressure.threshold);
        tracing::info!("  report path    : {}", self.output.report_path);
        tracing::info!(
            "  log file       : {}",
            self.logging.file.as_deref().unwrap_or("(none)")
        );
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
