//! DMA water-balance store.
//!
//! Holds one `DmaZoneRecord` per zone for the lifetime of a single analysis
//! session. The store is an ordinary owned value: callers create one per
//! session (see `session::AnalysisSession`) and nothing is shared between
//! sessions. Wrap it in a `Mutex` if it must be shared across threads.
//!
//! Zones keep their first-registration order; re-registering a zone
//! replaces its record in place rather than merging or appending.

use crate::logging::{self, Component};
use crate::model::{AnalysisError, DmaZoneRecord};

#[derive(Debug, Default, Clone)]
pub struct DmaBalance {
    zones: Vec<DmaZoneRecord>,
}

impl DmaBalance {
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes the balance for a zone and stores it, overwriting any
    /// previous record with the same id.
    ///
    /// Inputs are not sign-checked: a negative flow propagates into the
    /// leakage figures. Negative leakage (users metered above the bulk
    /// meter) is logged as a metering-error warning.
    pub fn register_zone(&mut self, zone_id: &str, total_flow: f64, user_flows: Vec<f64>) {
        let record = DmaZoneRecord::new(zone_id, total_flow, user_flows);

        if record.leakage < 0.0 {
            logging::warn(
                Component::Balance,
                Some(zone_id),
                &format!(
                    "user meters exceed bulk meter by {:.2} m³, possible metering error",
                    -record.leakage
                ),
            );
        }

        match self.zones.iter_mut().find(|z| z.zone_id == zone_id) {
            Some(existing) => {
                logging::debug(Component::Balance, Some(zone_id), "replacing existing zone record");
                *existing = record;
            }
            None => self.zones.push(record),
        }
    }

    /// Looks up a registered zone.
    pub fn get_zone(&self, zone_id: &str) -> Result<&DmaZoneRecord, AnalysisError> {
        self.zones
            .iter()
            .find(|z| z.zone_id == zone_id)
            .ok_or_else(|| AnalysisError::NotFound(zone_id.to_string()))
    }

    /// All registered zones, in first-registration order.
    pub fn zones(&self) -> &[DmaZoneRecord] {
        &self.zones
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
