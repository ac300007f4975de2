//! Analysis session: one run of the engine over one batch.
//!
//! The session owns the zone store and the run parameters. Nothing is
//! process-global, so independent sessions can run side by side.
//!
//! Failures are per unit: a zone whose night-flow series has a malformed
//! timestamp still gets its balance, classification and pressure report;
//! the failure is recorded and logged and the batch carries on.

use serde::Serialize;

use crate::alert::{classify, LeakageAssessment};
use crate::analysis::{compute_mnf, detect_anomalies, summarize};
use crate::balance::DmaBalance;
use crate::config::LeakmonConfig;
use crate::ingest::AnalysisBatch;
use crate::logging::{self, Component};
use crate::model::{
    DmaZoneRecord, NetworkSummary, NightFlowResult, NightWindow, PressureAnomalyReport,
    DEFAULT_PRESSURE_THRESHOLD,
};

/// Stage of the per-zone pipeline a failure occurred in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    NightFlow,
    Pressure,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::NightFlow => f.pad("night flow"),
            Stage::Pressure => f.pad("pressure"),
        }
    }
}

/// A unit of work that failed and was skipped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitFailure {
    pub zone_id: String,
    pub stage: Stage,
    pub message: String,
}

/// Everything the report and export layers need for one zone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneAnalysis {
    pub record: DmaZoneRecord,
    pub assessment: LeakageAssessment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub night_flow: Option<NightFlowResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressure: Option<PressureAnomalyReport>,
}

/// Result of `AnalysisSession::run`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisRun {
    pub zones: Vec<ZoneAnalysis>,
    pub summary: NetworkSummary,
    pub failures: Vec<UnitFailure>,
}

#[derive(Debug, Clone)]
pub struct AnalysisSession {
    balance: DmaBalance,
    window: NightWindow,
    pressure_threshold: f64,
}

impl Default for AnalysisSession {
    fn default() -> Self {
        AnalysisSession::new(NightWindow::default(), DEFAULT_PRESSURE_THRESHOLD)
    }
}

impl AnalysisSession {
    pub fn new(window: NightWindow, pressure_threshold: f64) -> Self {
        AnalysisSession {
            balance: DmaBalance::new(),
            window,
            pressure_threshold,
        }
    }

    pub fn from_config(config: &LeakmonConfig) -> Self {
        AnalysisSession::new(config.night_window(), config.pressure.threshold)
    }

    pub fn balance(&self) -> &DmaBalance {
        &self.balance
    }

    pub fn balance_mut(&mut self) -> &mut DmaBalance {
        &mut self.balance
    }

    /// Network summary over every zone registered so far.
    pub fn summary(&self) -> NetworkSummary {
        summarize(self.balance.zones())
    }

    /// Analyse a whole batch.
    ///
    /// Zones appear in the result once each, in first-registration order;
    /// a zone id repeated in the batch keeps the last balance and the last
    /// telemetry supplied for it.
    pub fn run(&mut self, batch: &AnalysisBatch) -> AnalysisRun {
        let mut night_flow: Vec<(String, NightFlowResult)> = Vec::new();
        let mut pressure: Vec<(String, PressureAnomalyReport)> = Vec::new();
        let mut failures = Vec::new();
        let mut units = 0usize;

        for input in &batch.zones {
            let zone_id = input.zone_id.as_str();
            self.balance
                .register_zone(zone_id, input.total_flow, input.user_flows.clone());
            night_flow.retain(|(id, _)| id != zone_id);
            pressure.retain(|(id, _)| id != zone_id);
            failures.retain(|f: &UnitFailure| f.zone_id != zone_id);

            if let Some(series) = &input.flow_series {
                units += 1;
                match compute_mnf(series, self.window) {
                    Ok(result) => {
                        if result.data_points == 0 {
                            logging::debug(Component::NightFlow, Some(zone_id), "no samples in night window");
                        }
                        night_flow.push((zone_id.to_string(), result));
                    }
                    Err(err) => {
                        logging::log_unit_failure(Component::NightFlow, zone_id, "MNF extraction", &err);
                        failures.push(UnitFailure {
                            zone_id: zone_id.to_string(),
                            stage: Stage::NightFlow,
                            message: err.to_string(),
                        });
                    }
                }
            }

            if let Some(series) = &input.pressure_series {
                units += 1;
                match detect_anomalies(series, self.pressure_threshold) {
                    Ok(report) => {
                        if report.anomaly_count > 0 {
                            logging::info(
                                Component::Pressure,
                                Some(zone_id),
                                &format!("{} pressure anomalies detected", report.anomaly_count),
                            );
                        }
                        pressure.push((zone_id.to_string(), report));
                    }
                    Err(err) => {
                        logging::log_unit_failure(Component::Pressure, zone_id, "Anomaly detection", &err);
                        failures.push(UnitFailure {
                            zone_id: zone_id.to_string(),
                            stage: Stage::Pressure,
                            message: err.to_string(),
                        });
                    }
                }
            }
        }

        let zones = self
            .balance
            .zones()
            .iter()
            .map(|record| {
                let assessment = classify(record.leakage_rate);
                logging::debug(
                    Component::Classifier,
                    Some(&record.zone_id),
                    &format!("{:.2}% -> {}", record.leakage_rate, assessment.level_label),
                );
                ZoneAnalysis {
                    night_flow: take_for(&mut night_flow, &record.zone_id),
                    pressure: take_for(&mut pressure, &record.zone_id),
                    record: record.clone(),
                    assessment,
                }
            })
            .collect();

        let summary = self.summary();
        logging::info(
            Component::Summary,
            None,
            &format!(
                "{} zones, avg leakage rate {:.2}%, {} critical",
                summary.zone_count, summary.avg_leakage_rate, summary.critical_zone_count
            ),
        );
        logging::log_batch_summary(units, units - failures.len(), failures.len());

        AnalysisRun {
            zones,
            summary,
            failures,
        }
    }
}

fn take_for<T>(results: &mut Vec<(String, T)>, zone_id: &str) -> Option<T> {
    let pos = results.iter().position(|(id, _)| id == zone_id)?;
    Some(results.remove(pos).1)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
