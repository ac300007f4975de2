//! End-to-end batch analysis tests
//!
//! Drive the public API the way the `leakmon` binary does: load a batch
//! file, run a session, render the report and export JSON.

use std::path::PathBuf;

use leakmon_service::alert::LeakageStatus;
use leakmon_service::export::to_json_at;
use leakmon_service::ingest::load_batch;
use leakmon_service::model::{AnalysisError, AnomalyKind};
use leakmon_service::report;
use leakmon_service::samples::sample_batch;
use leakmon_service::session::{AnalysisSession, Stage};

use chrono::{Local, TimeZone};

fn write_temp_batch(name: &str, json: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("leakmon_{}_{}.json", name, std::process::id()));
    std::fs::write(&path, json).expect("temp dir should be writable");
    path
}

#[test]
fn test_sample_batch_end_to_end() {
    let run = AnalysisSession::default().run(&sample_batch());

    assert_eq!(run.zones.len(), 3);
    assert!(run.failures.is_empty(), "sample data should analyse cleanly");

    for zone in &run.zones {
        let r = &zone.record;
        let users: f64 = r.user_flows.iter().sum();
        assert!(
            (r.leakage - (r.total_flow - users)).abs() < 1e-9,
            "leakage invariant broken for {}",
            r.zone_id
        );
    }

    // DMA-001: 2300.5 / 12500.5 = 18.40%
    assert_eq!(run.zones[0].assessment.status, LeakageStatus::Warning);
    // DMA-002: 1400.3 / 8200.3 = 17.08%
    assert_eq!(run.zones[1].assessment.status, LeakageStatus::Warning);
    // DMA-003: 3600.8 / 15600.8 = 23.08%
    assert_eq!(run.zones[2].assessment.status, LeakageStatus::Warning);

    let mnf = run.zones[0].night_flow.as_ref().expect("DMA-001 carries night flow");
    assert_eq!(mnf.mnf, 164.8);
    assert_eq!(mnf.data_points, 4);

    let pressure = run.zones[0].pressure.as_ref().expect("DMA-001 carries pressure");
    assert_eq!(pressure.anomaly_count, 1);
    assert_eq!(pressure.anomalies[0].time, "10:00");
    assert_eq!(pressure.anomalies[0].kind, AnomalyKind::Low);

    assert_eq!(run.summary.zone_count, 3);
    assert_eq!(run.summary.critical_zone_count, 0);
    assert_eq!(run.summary.total_leakage, 7301.6);
}

#[test]
fn test_batch_file_with_bad_units_still_reports() {
    let path = write_temp_batch(
        "bad_units",
        r#"{
            "zones": [
                {"zone_id": "NORTH", "total_flow": 1000, "user_flows": [600, 100],
                 "flow_series": [{"time": "02:00", "flow": 40}, {"time": "two", "flow": 41}]},
                {"zone_id": "SOUTH", "total_flow": 0, "user_flows": [],
                 "pressure_series": []},
                {"zone_id": "EAST", "total_flow": 500, "user_flows": [480],
                 "flow_series": [{"time": "14:00", "flow": 90}]}
            ]
        }"#,
    );
    let batch = load_batch(&path).expect("batch file should load");
    let _ = std::fs::remove_file(&path);

    let run = AnalysisSession::default().run(&batch);

    assert_eq!(run.zones.len(), 3);
    assert_eq!(run.failures.len(), 2);
    assert_eq!(run.failures[0].zone_id, "NORTH");
    assert_eq!(run.failures[0].stage, Stage::NightFlow);
    assert_eq!(
        run.failures[0].message,
        AnalysisError::MalformedTimestamp("two".to_string()).to_string()
    );
    assert_eq!(run.failures[1].zone_id, "SOUTH");
    assert_eq!(run.failures[1].stage, Stage::Pressure);

    // NORTH: 300 / 1000 = 30% -> critical
    assert_eq!(run.zones[0].assessment.status, LeakageStatus::Critical);
    // SOUTH: zero inflow, rate defined as 0
    assert_eq!(run.zones[1].record.leakage_rate, 0.0);
    // EAST: empty night window is a normal zero result
    let east_mnf = run.zones[2].night_flow.as_ref().unwrap();
    assert_eq!(east_mnf.data_points, 0);
    assert_eq!(east_mnf.mnf, 0.0);

    assert_eq!(run.summary.critical_zone_count, 1);

    let text = report::render(&run);
    assert!(text.contains("[Zone NORTH]"));
    assert!(text.contains("[Skipped units]"));
    assert!(text.contains("no samples in window"));
}

#[test]
fn test_export_of_sample_run_is_stable() {
    let run = AnalysisSession::default().run(&sample_batch());
    let now = Local.with_ymd_and_hms(2024, 5, 1, 13, 0, 0).unwrap();

    let first = to_json_at(&run, now).unwrap();
    let second = to_json_at(&run, now).unwrap();
    assert_eq!(first, second, "same run and clock must export identically");

    let value: serde_json::Value = serde_json::from_str(&first).unwrap();
    assert_eq!(value["zones"].as_array().map(Vec::len), Some(3));
    assert_eq!(value["summary"]["critical_zone_count"], 0);
    assert!(value.get("failures").is_none(), "empty failure list is omitted");
}

#[test]
fn test_rerunning_the_same_batch_is_idempotent() {
    let batch = sample_batch();
    let mut session = AnalysisSession::default();
    let first = session.run(&batch);
    let second = session.run(&batch);

    assert_eq!(first.zones, second.zones);
    assert_eq!(first.summary, second.summary);
    assert_eq!(session.balance().len(), 3);
}
