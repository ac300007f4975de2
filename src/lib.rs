//! DMA leakage and pressure analysis for a water distribution network.
//!
//! Computes district metered area water balances, minimum night flow,
//! pressure anomalies and tiered leakage status, and rolls zones up into
//! a network summary. See `session::AnalysisSession` for a whole-batch run.

pub mod alert;
pub mod analysis;
pub mod balance;
pub mod config;
pub mod export;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod report;
pub mod samples;
pub mod session;
