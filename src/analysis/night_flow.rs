//! Minimum night flow (MNF) extraction.
//!
//! Legitimate consumption is lowest in the small hours, so the minimum flow
//! into a DMA during a night window approximates its background leakage.

use crate::model::{round_to, AnalysisError, NightFlowResult, NightWindow, TimeSample};

/// Extracts the samples whose hour falls in `window` and reports their
/// minimum and mean.
///
/// An empty window is a normal outcome (no telemetry that night) and
/// returns `NightFlowResult::default()`. Any sample with an unparsable
/// time fails the whole call, even if it would fall outside the window.
pub fn compute_mnf(
    samples: &[TimeSample],
    window: NightWindow,
) -> Result<NightFlowResult, AnalysisError> {
    let mut in_window = Vec::new();
    for sample in samples {
        if window.contains(sample.hour()?) {
            in_window.push(sample.value);
        }
    }

    if in_window.is_empty() {
        return Ok(NightFlowResult::default());
    }

    let mnf = in_window.iter().copied().fold(f64::INFINITY, f64::min);
    let avg_flow = in_window.iter().sum::<f64>() / in_window.len() as f64;

    Ok(NightFlowResult {
        mnf: round_to(mnf, 2),
        avg_flow: round_to(avg_flow, 2),
        data_points: in_window.len(),
        flow_values: in_window.iter().map(|v| round_to(*v, 2)).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(points: &[(&str, f64)]) -> Vec<TimeSample> {
        points.iter().map(|(t, v)| TimeSample::new(t, *v)).collect()
    }

    #[test]
    fn test_mnf_over_default_window() {
        let samples = series(&[("02:00", 10.0), ("02:30", 8.0), ("03:00", 12.0)]);
        let result = compute_mnf(&samples, NightWindow::default()).unwrap();

        assert_eq!(result.mnf, 8.0);
        assert_eq!(result.avg_flow, 10.0);
        assert_eq!(result.data_points, 3);
        assert_eq!(result.flow_values, vec![10.0, 8.0, 12.0]);
    }

    #[test]
    fn test_mnf_ignores_samples_outside_window() {
        let samples = series(&[
            ("00:00", 180.5),
            ("01:30", 168.5),
            ("02:00", 165.2),
            ("02:30", 164.8),
            ("03:00", 166.5),
            ("03:30", 168.2),
            ("04:00", 172.5),
            ("04:30", 180.8),
        ]);
        let result = compute_mnf(&samples, NightWindow::default()).unwrap();

        assert_eq!(result.data_points, 4, "04:00 is outside the half-open window");
        assert_eq!(result.mnf, 164.8);
        assert!((result.avg_flow - 166.175).abs() < 0.01, "avg was {}", result.avg_flow);
    }

    #[test]
    fn test_empty_window_returns_zero_result() {
        let samples = series(&[("12:00", 300.0), ("13:00", 310.0)]);
        let result = compute_mnf(&samples, NightWindow::default()).unwrap();
        assert_eq!(result, NightFlowResult::default());
        assert_eq!(result.data_points, 0);
    }

    #[test]
    fn test_no_samples_returns_zero_result() {
        let result = compute_mnf(&[], NightWindow::default()).unwrap();
        assert_eq!(result.data_points, 0);
        assert_eq!(result.mnf, 0.0);
        assert_eq!(result.avg_flow, 0.0);
    }

    #[test]
    fn test_custom_window() {
        let samples = series(&[("01:00", 5.0), ("02:00", 4.0), ("05:00", 3.0)]);
        let window = NightWindow { start_hour: 1, end_hour: 3 };
        let result = compute_mnf(&samples, window).unwrap();
        assert_eq!(result.data_points, 2);
        assert_eq!(result.mnf, 4.0);
    }

    #[test]
    fn test_values_are_rounded_to_two_decimals() {
        let samples = series(&[("02:00", 10.004), ("02:15", 10.006)]);
        let result = compute_mnf(&samples, NightWindow::default()).unwrap();
        assert_eq!(result.flow_values, vec![10.0, 10.01]);
        assert_eq!(result.mnf, 10.0);
    }

    #[test]
    fn test_malformed_time_is_an_error() {
        let samples = series(&[("02:00", 10.0), ("late", 9.0)]);
        let result = compute_mnf(&samples, NightWindow::default());
        assert_eq!(result, Err(AnalysisError::MalformedTimestamp("late".to_string())));
    }
}
