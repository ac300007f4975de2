//! Demonstration dataset for the `leakmon` binary.
//!
//! Three DMA zones with bulk and user meter totals for one billing period,
//! plus a night-flow series and a pressure series. Used when the binary is
//! run without a batch file, and as a known-good fixture in tests.

use crate::ingest::{AnalysisBatch, ZoneInput};
use crate::model::TimeSample;

// ---------------------------------------------------------------------------
// Zone registry
// ---------------------------------------------------------------------------

/// Meter totals for a demonstration zone, in m³.
pub struct SampleZone {
    pub zone_id: &'static str,
    pub total_flow: f64,
    pub user_flows: &'static [f64],
}

pub static SAMPLE_ZONES: &[SampleZone] = &[
    SampleZone {
        zone_id: "DMA-001",
        total_flow: 12500.5,
        user_flows: &[1200.0, 2500.0, 1800.0, 3200.0, 1500.0],
    },
    SampleZone {
        zone_id: "DMA-002",
        total_flow: 8200.3,
        user_flows: &[900.0, 1800.0, 1200.0, 2100.0, 800.0],
    },
    SampleZone {
        zone_id: "DMA-003",
        total_flow: 15600.8,
        user_flows: &[1500.0, 2800.0, 2200.0, 3500.0, 2000.0],
    },
];

/// Half-hourly inflow from midnight to 04:30, m³/h.
pub static SAMPLE_NIGHT_FLOW: &[(&str, f64)] = &[
    ("00:00", 180.5),
    ("00:30", 175.2),
    ("01:00", 170.8),
    ("01:30", 168.5),
    ("02:00", 165.2),
    ("02:30", 164.8),
    ("03:00", 166.5),
    ("03:30", 168.2),
    ("04:00", 172.5),
    ("04:30", 180.8),
];

/// Hourly pressure, MPa. The 10:00 reading is a low-pressure event.
pub static SAMPLE_PRESSURE: &[(&str, f64)] = &[
    ("08:00", 0.48),
    ("09:00", 0.47),
    ("10:00", 0.32),
    ("11:00", 0.46),
    ("12:00", 0.47),
];

/// Zone whose telemetry the sample series belong to.
pub const SAMPLE_TELEMETRY_ZONE: &str = "DMA-001";

fn to_samples(points: &[(&str, f64)]) -> Vec<TimeSample> {
    points.iter().map(|(t, v)| TimeSample::new(t, *v)).collect()
}

/// Build the demonstration batch.
pub fn sample_batch() -> AnalysisBatch {
    let zones = SAMPLE_ZONES
        .iter()
        .map(|z| {
            let has_telemetry = z.zone_id == SAMPLE_TELEMETRY_ZONE;
            ZoneInput {
                zone_id: z.zone_id.to_string(),
                total_flow: z.total_flow,
                user_flows: z.user_flows.to_vec(),
                flow_series: has_telemetry.then(|| to_samples(SAMPLE_NIGHT_FLOW)),
                pressure_series: has_telemetry.then(|| to_samples(SAMPLE_PRESSURE)),
            }
        })
        .collect();

    AnalysisBatch { zones }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
