//! Fixed-width text report for an analysis run.
//!
//! Flows, volumes and rates print with 2 decimals, pressures with 3.

use std::fmt::Write;

use crate::session::{AnalysisRun, ZoneAnalysis};

const WIDTH: usize = 70;

/// Render the full DMA leakage report.
pub fn render(run: &AnalysisRun) -> String {
    let mut out = String::new();
    let heavy = "=".repeat(WIDTH);

    line(&mut out, &heavy);
    line(&mut out, "Water Distribution Network DMA Leakage Analysis Report");
    line(&mut out, &heavy);

    for zone in &run.zones {
        render_zone(&mut out, zone);
    }

    if !run.failures.is_empty() {
        line(&mut out, &heavy);
        line(&mut out, "[Skipped units]");
        for failure in &run.failures {
            line(
                &mut out,
                &format!("  {:<12} {:<11} {}", failure.zone_id, failure.stage, failure.message),
            );
        }
        line(&mut out, "");
    }

    if run.summary.zone_count > 0 {
        let s = &run.summary;
        line(&mut out, &heavy);
        line(&mut out, "[Network summary]");
        line(&mut out, &format!("  {:<22}{} zones", "Zone count:", s.zone_count));
        line(&mut out, &format!("  {:<22}{:.2}%", "Average leakage rate:", s.avg_leakage_rate));
        line(&mut out, &format!("  {:<22}{:.2} m³", "Total leakage:", s.total_leakage));
        line(&mut out, &format!("  {:<22}{} zones", "Critical zones:", s.critical_zone_count));
        line(&mut out, "");
    }

    out.push_str(&heavy);
    out
}

fn render_zone(out: &mut String, zone: &ZoneAnalysis) {
    let r = &zone.record;
    let a = &zone.assessment;

    line(out, "");
    line(out, &format!("[Zone {}]", r.zone_id));
    line(out, &"-".repeat(WIDTH));
    line(out, &format!("  {:<20}{:.2} m³", "Bulk meter total:", r.total_flow));
    line(out, &format!("  {:<20}{:.2} m³", "User meter total:", r.user_total));
    line(out, &format!("  {:<20}{:.2} m³", "Leakage volume:", r.leakage));
    line(out, &format!("  {:<20}{:.2}%", "Leakage rate:", r.leakage_rate));
    line(out, &format!("  {:<20}{}", "Status level:", a.level_label));
    line(out, &format!("  {:<20}{}", "Recommended action:", a.recommended_action));
    line(out, &format!("  {:<20}{}", "Urgency:", a.urgency));

    if let Some(mnf) = &zone.night_flow {
        if mnf.data_points == 0 {
            line(out, &format!("  {:<20}no samples in window", "Night flow:"));
        } else {
            line(
                out,
                &format!(
                    "  {:<20}MNF {:.2} m³/h, mean {:.2} m³/h over {} points",
                    "Night flow:", mnf.mnf, mnf.avg_flow, mnf.data_points
                ),
            );
        }
    }

    if let Some(p) = &zone.pressure {
        line(
            out,
            &format!(
                "  {:<20}mean {:.3} MPa, std {:.3}, range {:.3}-{:.3}, {} anomalies",
                "Pressure:", p.avg_pressure, p.std_pressure, p.min_pressure, p.max_pressure, p.anomaly_count
            ),
        );
        for anomaly in &p.anomalies {
            line(
                out,
                &format!(
                    "    {:>5}  {:.3} MPa  {:<4} ({:.2}%)",
                    anomaly.time, anomaly.pressure, anomaly.kind, anomaly.deviation_pct
                ),
            );
        }
    }

    line(out, "");
}

fn line(out: &mut String, text: &str) {
    // Writing to a String cannot fail
    let _ = writeln!(out, "{}", text);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::{AnalysisBatch, ZoneInput};
    use crate::model::TimeSample;
    use crate::session::AnalysisSession;

    fn run_for(zones: Vec<ZoneInput>) -> AnalysisRun {
        AnalysisSession::default().run(&AnalysisBatch { zones })
    }

    fn zone(id: &str, total: f64, users: &[f64]) -> ZoneInput {
        ZoneInput {
            zone_id: id.to_string(),
            total_flow: total,
            user_flows: users.to_vec(),
            flow_series: None,
            pressure_series: None,
        }
    }

    #[test]
    fn test_report_contains_zone_figures_with_two_decimals() {
        let text = render(&run_for(vec![zone("DMA-001", 12500.5, &[1200.0, 2500.0, 1800.0, 3200.0, 1500.0])]));
        assert!(text.contains("[Zone DMA-001]"));
        assert!(text.contains("12500.50 m³"));
        assert!(text.contains("10200.00 m³"));
        assert!(text.contains("2300.50 m³"));
        assert!(text.contains("18.40%"));
        assert!(text.contains("C-Needs attention"));
    }

    #[test]
    fn test_report_summary_only_when_zones_exist() {
        let empty = render(&run_for(vec![]));
        assert!(!empty.contains("[Network summary]"));
        assert!(empty.starts_with(&"=".repeat(WIDTH)));

        let one = render(&run_for(vec![zone("A", 100.0, &[70.0])]));
        assert!(one.contains("[Network summary]"));
        assert!(one.contains("Critical zones:       1 zones"));
    }

    #[test]
    fn test_report_lists_pressure_anomalies_and_failures() {
        let mut a = zone("A", 100.0, &[90.0]);
        a.pressure_series = Some(vec![
            TimeSample::new("08:00", 0.48),
            TimeSample::new("09:00", 0.47),
            TimeSample::new("10:00", 0.32),
            TimeSample::new("11:00", 0.46),
            TimeSample::new("12:00", 0.47),
        ]);
        let mut b = zone("B", 100.0, &[90.0]);
        b.flow_series = Some(vec![TimeSample::new("xx", 1.0)]);

        let text = render(&run_for(vec![a, b]));
        assert!(text.contains("mean 0.440 MPa"));
        assert!(text.contains("10:00  0.320 MPa  low  (27.27%)"));
        assert!(text.contains("[Skipped units]"));
        assert!(text.contains("Malformed timestamp: 'xx'"));
    }
}
