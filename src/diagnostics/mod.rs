//! Diagnostics returned alongside the enhanced map.
//!
//! `EnhanceReport` bundles the input shape, per-stage timings and magnitude
//! summaries of the intermediate maps. Everything serialises to JSON for the
//! demo tools.

pub mod report;
pub mod timing;

pub use report::{EnhanceReport, InputDescriptor, MapStats};
pub use timing::{StageTiming, TimingBreakdown};
