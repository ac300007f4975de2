//! JSON export of an analysis run.
//!
//! Output is UTF-8, pretty-printed with 2-space indentation, with
//! non-ASCII characters written as-is (zone names are often not ASCII).
//!
//! # Clock injection
//! `build_export_at` takes `now` rather than calling `Local::now()` so the
//! timestamp is deterministic in tests; `export_report` uses the real clock.

use std::path::Path;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::logging::{self, Component};
use crate::model::NetworkSummary;
use crate::session::{AnalysisRun, UnitFailure, ZoneAnalysis};

/// The exported document.
#[derive(Debug, Clone, Serialize)]
pub struct ExportDocument<'a> {
    pub timestamp: String,
    pub zones: &'a [ZoneAnalysis],
    pub summary: &'a NetworkSummary,
    #[serde(skip_serializing_if = "no_failures")]
    pub failures: &'a [UnitFailure],
}

fn no_failures(failures: &&[UnitFailure]) -> bool {
    failures.is_empty()
}

pub fn build_export_at(run: &AnalysisRun, now: DateTime<Local>) -> ExportDocument<'_> {
    ExportDocument {
        timestamp: now.format("%Y-%m-%d %H:%M:%S%.6f").to_string(),
        zones: &run.zones,
        summary: &run.summary,
        failures: &run.failures,
    }
}

pub fn to_json_at(run: &AnalysisRun, now: DateTime<Local>) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&build_export_at(run, now))
}

/// Write the run to `path`, stamped with the current local time.
pub fn export_report(run: &AnalysisRun, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let json = to_json_at(run, Local::now())?;
    std::fs::write(path, json)?;
    logging::info(
        Component::Export,
        None,
        &format!("DMA report exported to {}", path.display()),
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
