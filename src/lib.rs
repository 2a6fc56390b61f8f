//! Latency Grapher
//!
//! Aggregates latency measurements recorded per experiment run (one run per
//! concurrent client count), averages the "query" and "buy" latencies of
//! every run, and renders both averages against client count as a line
//! chart.

pub mod app;
pub mod chart;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod series;
pub mod source;
pub mod stats;

// Re-export commonly used types
pub use app::Pipeline;
pub use chart::{ChartSpec, PlotSink, PlottersRenderer, RecordingSink};
pub use error::{AppError, Result};
pub use models::{Config, EmptyRunPolicy, LatencySeries, Measurement, RunAggregate};
pub use series::SeriesBuilder;
pub use source::{FileSystemSource, MeasurementSource, MemorySource};

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Build metadata captured by the build script
pub fn build_info() -> String {
    format!(
        "{} v{} ({}, built {} for {})",
        PKG_NAME,
        VERSION,
        env!("GIT_COMMIT"),
        env!("BUILD_TIME"),
        env!("TARGET_TRIPLE"),
    )
}

/// Default configuration values
pub mod defaults {
    pub const DEFAULT_BASE_DIR: &str = "out";
    pub const DEFAULT_FIRST_RUN: u32 = 1;
    pub const DEFAULT_LAST_RUN: u32 = 10;
    pub const DEFAULT_RUN_PREFIX: &str = "clients_";
    pub const DEFAULT_EXTENSION: &str = "txt";
    pub const DEFAULT_OUTPUT_PATH: &str = "latencies.png";
    pub const DEFAULT_TITLE: &str = "Average Request Latency vs Number of Concurrent Clients";
    pub const DEFAULT_X_LABEL: &str = "Number of Concurrent Clients";
    pub const DEFAULT_Y_LABEL: &str = "Average Latency (ms)";
    pub const QUERY_SERIES_LABEL: &str = "Queries";
    pub const BUY_SERIES_LABEL: &str = "Buys";
    pub const DEFAULT_WIDTH: u32 = 800;
    pub const DEFAULT_HEIGHT: u32 = 600;
    pub const DEFAULT_ENABLE_COLOR: bool = true;

    /// Longest run range accepted by validation
    pub const MAX_RUN_SPAN: u32 = 1000;
    /// Smallest and largest accepted image dimension in pixels
    pub const MIN_DIMENSION: u32 = 100;
    pub const MAX_DIMENSION: u32 = 10_000;
}
