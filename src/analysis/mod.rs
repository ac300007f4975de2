//! Numeric analysis over zone balances and telemetry series.
//!
//! Every function here is pure: series are borrowed for the duration of
//! the call and nothing is retained.
//!
//! Submodules:
//! - `night_flow` - minimum night flow (MNF) extraction.
//! - `pressure`   - relative-deviation pressure anomaly detection.
//! - `summary`    - network-wide rollup across zones.

pub mod night_flow;
pub mod pressure;
pub mod summary;

pub use night_flow::compute_mnf;
pub use pressure::detect_anomalies;
pub use summary::summarize;
