//! Input loading for analysis batches.
//!
//! Submodules:
//! - `batch` - JSON batch files of zone balances and telemetry series.

pub mod batch;

pub use batch::{load_batch, parse_batch, AnalysisBatch, IngestError, ZoneInput};
