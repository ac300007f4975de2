//! Network-wide rollup across DMA zones.

use crate::model::{round_to, DmaZoneRecord, NetworkSummary, CRITICAL_LEAKAGE_RATE};

/// Aggregates zone balances into a `NetworkSummary`.
///
/// `avg_leakage_rate` is the unweighted mean of per-zone rates: a small
/// zone counts as much as a large one. An empty slice gives an all-zero
/// summary.
pub fn summarize(zones: &[DmaZoneRecord]) -> NetworkSummary {
    if zones.is_empty() {
        return NetworkSummary::default();
    }

    let rate_sum: f64 = zones.iter().map(|z| z.leakage_rate).sum();
    let total_leakage: f64 = zones.iter().map(|z| z.leakage).sum();
    let critical_zone_count = zones
        .iter()
        .filter(|z| z.leakage_rate >= CRITICAL_LEAKAGE_RATE)
        .count();

    NetworkSummary {
        zone_count: zones.len(),
        avg_leakage_rate: round_to(rate_sum / zones.len() as f64, 2),
        total_leakage: round_to(total_leakage, 2),
        critical_zone_count,
    }
}
