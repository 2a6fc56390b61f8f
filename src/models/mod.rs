//! Data models and structures for the latency grapher

pub mod config;
pub mod measurement;

// Re-export main model types
pub use config::{Config, EmptyRunPolicy};
pub use measurement::{LatencySeries, Measurement, RunAggregate};
