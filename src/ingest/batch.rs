//! JSON batch loader.
//!
//! A batch is the complete input of one analysis run:
//!
//! ```json
//! {
//!   "zones": [
//!     {
//!       "zone_id": "DMA-001",
//!       "total_flow": 12500.5,
//!       "user_flows": [1200, 2500, 1800],
//!       "flow_series": [{"time": "02:00", "flow": 165.2}],
//!       "pressure_series": [{"time": "10:00", "pressure": 0.32}]
//!     }
//!   ]
//! }
//! ```
//!
//! Series are optional. An absent series means "not supplied" and is
//! skipped; an explicitly empty one is passed to the analysis as-is.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::TimeSample;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Failed to read batch file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse batch: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One zone's meter readings and optional telemetry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneInput {
    pub zone_id: String,
    pub total_flow: f64,
    #[serde(default)]
    pub user_flows: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow_series: Option<Vec<TimeSample>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure_series: Option<Vec<TimeSample>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisBatch {
    #[serde(default)]
    pub zones: Vec<ZoneInput>,
}

/// Parse a batch from a JSON string.
pub fn parse_batch(json: &str) -> Result<AnalysisBatch, IngestError> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse a batch file.
pub fn load_batch(path: &Path) -> Result<AnalysisBatch, IngestError> {
    let content = std::fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_batch(&content)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
