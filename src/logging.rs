//! Structured logging for the leakage analysis service
//!
//! Events carry the engine component and, where relevant, the DMA zone
//! they concern. Console output goes to stderr so the text report on
//! stdout stays clean; an optional log file receives the same events
//! without ANSI colouring.

use std::fmt;
use std::fs::OpenOptions;
use std::str::FromStr;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt as tracing_fmt;
use tracing_subscriber::prelude::*;

use crate::model::AnalysisError;

// ---------------------------------------------------------------------------
// Log Levels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// Directive understood by `EnvFilter`.
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warning => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" | "trace" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            other => Err(format!("unknown log level '{}'", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Engine Components
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Balance,
    NightFlow,
    Pressure,
    Classifier,
    Summary,
    Ingest,
    Export,
    System,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Balance => write!(f, "BAL"),
            Component::NightFlow => write!(f, "MNF"),
            Component::Pressure => write!(f, "PRS"),
            Component::Classifier => write!(f, "CLS"),
            Component::Summary => write!(f, "SUM"),
            Component::Ingest => write!(f, "IN"),
            Component::Export => write!(f, "OUT"),
            Component::System => write!(f, "SYS"),
        }
    }
}

// ---------------------------------------------------------------------------
// Failure Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureType {
    /// Expected failure - the unit simply has no usable data this run
    Expected,
    /// Unexpected failure - the input is corrupt or the caller misused the API
    Unexpected,
}

impl fmt::Display for FailureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureType::Expected => write!(f, "EXPECTED"),
            FailureType::Unexpected => write!(f, "UNEXPECTED"),
        }
    }
}

/// Classify an analysis failure for logging purposes.
pub fn classify_failure(err: &AnalysisError) -> FailureType {
    match err {
        // A zone with no pressure telemetry is routine (new meter, logger outage)
        AnalysisError::EmptyInput(_) => FailureType::Expected,
        AnalysisError::MalformedTimestamp(_) => FailureType::Unexpected,
        AnalysisError::NotFound(_) => FailureType::Unexpected,
    }
}

// ---------------------------------------------------------------------------
// Subscriber Setup
// ---------------------------------------------------------------------------

/// Install the global tracing subscriber.
///
/// `RUST_LOG`, when set, takes precedence over `min_level`. Returns an
/// error if the log file cannot be opened or a subscriber is already set.
pub fn init_logger(
    min_level: LogLevel,
    log_file: Option<&str>,
    console_timestamps: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(min_level.as_directive()));

    let timed_console = console_timestamps
        .then(|| tracing_fmt::layer().with_target(false).with_writer(std::io::stderr));
    let plain_console = (!console_timestamps).then(|| {
        tracing_fmt::layer()
            .with_target(false)
            .without_time()
            .with_writer(std::io::stderr)
    });

    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(
                tracing_fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(timed_console)
        .with(plain_console)
        .with(file_layer)
        .try_init()?;

    Ok(())
}

// ---------------------------------------------------------------------------
// Public Logging Functions
// ---------------------------------------------------------------------------

/// Log a general informational message
pub fn info(component: Component, zone_id: Option<&str>, message: &str) {
    tracing::info!(component = %component, zone = zone_id.unwrap_or("-"), "{}", message);
}

/// Log a warning message
pub fn warn(component: Component, zone_id: Option<&str>, message: &str) {
    tracing::warn!(component = %component, zone = zone_id.unwrap_or("-"), "{}", message);
}

/// Log an error message
pub fn error(component: Component, zone_id: Option<&str>, message: &str) {
    tracing::error!(component = %component, zone = zone_id.unwrap_or("-"), "{}", message);
}

/// Log a debug message
pub fn debug(component: Component, zone_id: Option<&str>, message: &str) {
    tracing::debug!(component = %component, zone = zone_id.unwrap_or("-"), "{}", message);
}

// ---------------------------------------------------------------------------
// Structured Failure Logging
// ---------------------------------------------------------------------------

/// Log a failed unit of work with automatic classification
pub fn log_unit_failure(component: Component, zone_id: &str, operation: &str, err: &AnalysisError) {
    let failure_type = classify_failure(err);
    let message = format!("{} failed [{}]: {}", operation, failure_type, err);

    match failure_type {
        FailureType::Expected => warn(component, Some(zone_id), &message),
        FailureType::Unexpected => error(component, Some(zone_id), &message),
    }
}

/// Log a summary of a batch run
pub fn log_batch_summary(total: usize, successful: usize, failed: usize) {
    let message = format!(
        "Batch complete: {}/{} units successful, {} failed",
        successful, total, failed
    );

    if failed == 0 {
        info(Component::System, None, &message);
    } else if successful == 0 {
        error(Component::System, None, &message);
    } else {
        warn(Component::System, None, &message);
    }
}
