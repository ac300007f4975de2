//! Core data types for the DMA leakage analysis engine.
//!
//! This module defines the shared domain model imported by all other modules.
//! It contains no logic beyond derived-field arithmetic and rounding helpers,
//! and no I/O.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Engine constants
// ---------------------------------------------------------------------------

/// Default night window start hour (inclusive).
pub const DEFAULT_NIGHT_START_HOUR: u32 = 2;

/// Default night window end hour (exclusive).
pub const DEFAULT_NIGHT_END_HOUR: u32 = 4;

/// Default relative deviation above which a pressure sample is anomalous.
pub const DEFAULT_PRESSURE_THRESHOLD: f64 = 0.15;

/// Leakage rate (%) at or above which a zone is critical. Shared by the
/// classifier's top tier and the network summary's critical count.
pub const CRITICAL_LEAKAGE_RATE: f64 = 25.0;

// ---------------------------------------------------------------------------
// Time series
// ---------------------------------------------------------------------------

/// A single clock-stamped measurement, used for both flow and pressure series.
///
/// `time` is a local "HH:MM" clock string. The numeric field is accepted
/// under `value`, `flow` or `pressure` so telemetry exports can be fed
/// directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSample {
    pub time: String,
    #[serde(alias = "flow", alias = "pressure")]
    pub value: f64,
}

impl TimeSample {
    pub fn new(time: &str, value: f64) -> Self {
        TimeSample {
            time: time.to_string(),
            value,
        }
    }

    /// Parses the integer hour from the leading component of `time`.
    pub fn hour(&self) -> Result<u32, AnalysisError> {
        self.time
            .split(':')
            .next()
            .map(str::trim)
            .and_then(|h| h.parse::<u32>().ok())
            .ok_or_else(|| AnalysisError::MalformedTimestamp(self.time.clone()))
    }
}

// ---------------------------------------------------------------------------
// Zone balance
// ---------------------------------------------------------------------------

/// Water balance for one district metered area.
///
/// Derived fields are computed once in `DmaZoneRecord::new` and never
/// updated in place:
///   leakage      = total_flow - user_total
///   leakage_rate = leakage / total_flow * 100   (0 when total_flow == 0)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DmaZoneRecord {
    pub zone_id: String,
    pub total_flow: f64,
    pub user_flows: Vec<f64>,
    pub user_total: f64,
    pub leakage: f64,
    pub leakage_rate: f64,
}

impl DmaZoneRecord {
    pub fn new(zone_id: &str, total_flow: f64, user_flows: Vec<f64>) -> Self {
        let user_total: f64 = user_flows.iter().sum();
        let leakage = total_flow - user_total;
        let leakage_rate = if total_flow > 0.0 {
            leakage / total_flow * 100.0
        } else {
            0.0
        };

        DmaZoneRecord {
            zone_id: zone_id.to_string(),
            total_flow,
            user_flows,
            user_total,
            leakage,
            leakage_rate,
        }
    }
}

// ---------------------------------------------------------------------------
// Night flow
// ---------------------------------------------------------------------------

/// Half-open hour window `[start_hour, end_hour)` used for MNF extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NightWindow {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl NightWindow {
    pub fn contains(&self, hour: u32) -> bool {
        self.start_hour <= hour && hour < self.end_hour
    }
}

impl Default for NightWindow {
    fn default() -> Self {
        NightWindow {
            start_hour: DEFAULT_NIGHT_START_HOUR,
            end_hour: DEFAULT_NIGHT_END_HOUR,
        }
    }
}

/// Minimum-night-flow result. All numeric fields are rounded to 2 decimals.
/// An empty window yields `NightFlowResult::default()` (all zero, no values).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NightFlowResult {
    pub mnf: f64,
    pub avg_flow: f64,
    pub data_points: usize,
    pub flow_values: Vec<f64>,
}

// ---------------------------------------------------------------------------
// Pressure
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnomalyKind {
    Low,
    High,
}

impl std::fmt::Display for AnomalyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnomalyKind::Low => f.pad("low"),
            AnomalyKind::High => f.pad("high"),
        }
    }
}

/// A pressure sample whose relative deviation from the series mean exceeded
/// the detection threshold. `pressure` is the raw sample value;
/// `deviation_pct` is rounded to 2 decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PressureAnomaly {
    pub index: usize,
    pub time: String,
    pub pressure: f64,
    pub deviation_pct: f64,
    pub kind: AnomalyKind,
}

/// Distribution statistics (rounded to 3 decimals) and flagged samples for
/// one pressure series. Anomalies are in original sample order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PressureAnomalyReport {
    pub avg_pressure: f64,
    pub std_pressure: f64,
    pub min_pressure: f64,
    pub max_pressure: f64,
    pub anomalies: Vec<PressureAnomaly>,
    pub anomaly_count: usize,
}

// ---------------------------------------------------------------------------
// Network summary
// ---------------------------------------------------------------------------

/// Network-wide rollup across all registered zones. Rates and volumes are
/// rounded to 2 decimals. Derived on demand, never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkSummary {
    pub zone_count: usize,
    pub avg_leakage_rate: f64,
    pub total_leakage: f64,
    pub critical_zone_count: usize,
}

// ---------------------------------------------------------------------------
// Rounding
// ---------------------------------------------------------------------------

/// Rounds to `digits` decimal places, half away from zero.
pub fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors raised by the analysis engine. Every other irregular input
/// (negative flow, zero total flow, empty night window, single pressure
/// sample) is a defined edge case, not an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// Lookup of a zone that was never registered.
    #[error("Zone not found: {0}")]
    NotFound(String),
    /// The time field has no parsable hour component.
    #[error("Malformed timestamp: '{0}'")]
    MalformedTimestamp(String),
    /// An operation that needs at least one sample received none.
    #[error("Empty input: {0}")]
    EmptyInput(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
