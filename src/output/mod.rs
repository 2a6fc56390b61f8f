//! Output formatting and display system
//!
//! Renders the averaged series as a plain or colored table, or as JSON,
//! once the chart has been written.

mod formatter;
mod colored;

pub use formatter::{
    Alignment,
    Column,
    FormattingOptions,
    OutputFormatter,
    PlainFormatter,
    RowData,
};
pub use colored::{
    ColoredFormatter,
    ColorScheme,
    PerformanceLevel,
};

use crate::{
    error::Result,
    models::{Config, LatencySeries},
};
use serde::Serialize;

/// Output formatting factory for creating appropriate formatters
pub struct OutputFormatterFactory;

impl OutputFormatterFactory {
    /// Create a formatter based on color support and preferences
    pub fn create_formatter(enable_color: bool, verbose: bool) -> Box<dyn OutputFormatter> {
        let options = FormattingOptions {
            enable_color,
            verbose_mode: verbose,
            table_borders: true,
        };

        if enable_color {
            Box::new(ColoredFormatter::new(options))
        } else {
            Box::new(PlainFormatter::new(options))
        }
    }
}

/// JSON document printed with `--json`
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    output: String,
    clients: &'a [u32],
    /// NaN averages serialize as null
    query_avg_ms: Vec<Option<f64>>,
    buy_avg_ms: Vec<Option<f64>>,
    files: Vec<usize>,
}

impl<'a> JsonReport<'a> {
    fn new(series: &'a LatencySeries, config: &Config) -> Self {
        let finite = |values: &[f64]| -> Vec<Option<f64>> {
            values.iter().map(|v| v.is_finite().then_some(*v)).collect()
        };
        Self {
            output: config.output_path.display().to_string(),
            clients: &series.clients,
            query_avg_ms: finite(&series.query),
            buy_avg_ms: finite(&series.buy),
            files: series.runs.iter().map(|r| r.sample_count).collect(),
        }
    }
}

/// Main output coordinator that handles all result display
pub struct OutputCoordinator {
    formatter: Box<dyn OutputFormatter>,
    json: bool,
}

impl OutputCoordinator {
    /// Coordinator matching the configured color, verbosity and JSON mode
    pub fn from_config(config: &Config) -> Self {
        Self {
            formatter: OutputFormatterFactory::create_formatter(config.enable_color, config.verbose),
            json: config.json,
        }
    }

    /// Render the run summary
    pub fn display_results(&self, series: &LatencySeries, config: &Config) -> Result<String> {
        if self.json {
            return Ok(serde_json::to_string_pretty(&JsonReport::new(series, config))?);
        }

        let mut sections = Vec::new();
        sections.push(self.formatter.format_header(&config.title)?);
        sections.push(self.formatter.format_series_table(series)?);

        let empty_runs: Vec<String> = series
            .runs
            .iter()
            .filter(|run| run.is_empty())
            .map(|run| run.clients.to_string())
            .collect();
        if !empty_runs.is_empty() {
            sections.push(self.formatter.format_warning(&format!(
                "no measurement files for client counts {}",
                empty_runs.join(", ")
            ))?);
        }

        sections.push(self.formatter.format_chart_written(&config.output_path)?);
        Ok(sections.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RunAggregate;
    use std::path::PathBuf;

    fn series() -> LatencySeries {
        let mut series = LatencySeries::new();
        for (clients, query, buy, files) in [(1, 10.0, 20.0, 1), (2, f64::NAN, f64::NAN, 0)] {
            series.push(RunAggregate {
                clients,
                directory: PathBuf::from(format!("out/clients_{}", clients)),
                query_avg: query,
                buy_avg: buy,
                sample_count: files,
            });
        }
        series
    }

    #[test]
    fn test_plain_summary() {
        let config = Config { enable_color: false, ..Config::default() };
        let output = OutputCoordinator::from_config(&config)
            .display_results(&series(), &config)
            .unwrap();

        assert!(output.starts_with("Average Request Latency vs Number of Concurrent Clients"));
        assert!(output.contains("10.000"));
        assert!(output.contains("Warning: no measurement files for client counts 2"));
        assert!(output.ends_with("Chart written to latencies.png"));
    }

    #[test]
    fn test_json_summary() {
        let config = Config { json: true, ..Config::default() };
        let output = OutputCoordinator::from_config(&config)
            .display_results(&series(), &config)
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["output"], "latencies.png");
        assert_eq!(value["clients"], serde_json::json!([1, 2]));
        assert_eq!(value["query_avg_ms"], serde_json::json!([10.0, null]));
        assert_eq!(value["buy_avg_ms"], serde_json::json!([20.0, null]));
        assert_eq!(value["files"], serde_json::json!([1, 0]));
    }

    #[test]
    fn test_factory_plain_formatter() {
        let formatter = OutputFormatterFactory::create_formatter(false, false);
        assert_eq!(formatter.format_warning("x").unwrap(), "Warning: x");
    }
}
