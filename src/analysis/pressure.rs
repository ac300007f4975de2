//! Pressure anomaly detection.
//!
//! The threshold is relative to the series mean rather than an absolute
//! pressure, so the same threshold works for zones operating at very
//! different nominal pressures.

use crate::model::{
    round_to, AnalysisError, AnomalyKind, PressureAnomaly, PressureAnomalyReport, TimeSample,
};

/// Flags samples whose relative deviation `|p - mean| / mean` is strictly
/// greater than `threshold`.
///
/// Standard deviation is the Bessel-corrected sample deviation, 0 for a
/// single sample. Relative deviation is defined as 0 when the mean is not
/// positive, so an all-zero series never flags anything.
pub fn detect_anomalies(
    samples: &[TimeSample],
    threshold: f64,
) -> Result<PressureAnomalyReport, AnalysisError> {
    if samples.is_empty() {
        return Err(AnalysisError::EmptyInput("pressure series has no samples".to_string()));
    }

    let n = samples.len() as f64;
    let mean = samples.iter().map(|s| s.value).sum::<f64>() / n;
    let std = if samples.len() > 1 {
        let sum_sq: f64 = samples.iter().map(|s| (s.value - mean).powi(2)).sum();
        (sum_sq / (n - 1.0)).sqrt()
    } else {
        0.0
    };
    let min = samples.iter().map(|s| s.value).fold(f64::INFINITY, f64::min);
    let max = samples.iter().map(|s| s.value).fold(f64::NEG_INFINITY, f64::max);

    let anomalies: Vec<PressureAnomaly> = samples
        .iter()
        .enumerate()
        .filter_map(|(index, sample)| {
            let deviation = if mean > 0.0 {
                (sample.value - mean).abs() / mean
            } else {
                0.0
            };
            if deviation <= threshold {
                return None;
            }
            Some(PressureAnomaly {
                index,
                time: sample.time.clone(),
                pressure: sample.value,
                deviation_pct: round_to(deviation * 100.0, 2),
                kind: if sample.value < mean { AnomalyKind::Low } else { AnomalyKind::High },
            })
        })
        .collect();

    Ok(PressureAnomalyReport {
        avg_pressure: round_to(mean, 3),
        std_pressure: round_to(std, 3),
        min_pressure: round_to(min, 3),
        max_pressure: round_to(max, 3),
        anomaly_count: anomalies.len(),
        anomalies,
    })
}
