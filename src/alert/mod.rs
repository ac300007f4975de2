//! Zone status alerting.
//!
//! Submodules:
//! - `classify` - four-tier leakage status with recommended actions.

pub mod classify;

pub use classify::{classify, LeakageAssessment, LeakageLevel, LeakageStatus, Urgency};
