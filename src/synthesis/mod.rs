//! Deterministic data synthesizer.
//!
//! Generates baseline telemetry for one simulated monitoring session:
//! - a fixed-origin timeline at 10-minute resolution
//! - Gaussian sensor readings with seeded anomaly injection
//! - agent log records, including the alert logs that drive metrics
//! - per-agent security metrics derived from the log table
//!
//! All randomness flows from one seeded generator per invocation, so
//! identical inputs always yield bit-identical tables.

pub mod generator;
pub mod timeline;

pub use generator::*;
pub use timeline::*;
