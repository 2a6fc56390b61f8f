//! Measurement, per-run aggregate and series data structures

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One (query, buy) latency pair read from a measurement file, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub query_ms: f64,
    pub buy_ms: f64,
}

impl Measurement {
    pub fn new(query_ms: f64, buy_ms: f64) -> Self {
        Self { query_ms, buy_ms }
    }
}

/// Averages of one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunAggregate {
    /// Concurrent client count identifying the run
    pub clients: u32,
    /// Directory the measurements were read from
    pub directory: PathBuf,
    /// Mean query latency in milliseconds
    pub query_avg: f64,
    /// Mean buy latency in milliseconds
    pub buy_avg: f64,
    /// Number of measurement files that contributed
    pub sample_count: usize,
}

impl RunAggregate {
    /// Whether this run had no measurements and carries NaN averages
    pub fn is_empty(&self) -> bool {
        self.sample_count == 0
    }
}

/// Index-aligned average series, ordered by ascending client count
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LatencySeries {
    pub clients: Vec<u32>,
    pub query: Vec<f64>,
    pub buy: Vec<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub runs: Vec<RunAggregate>,
}

impl LatencySeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one run, keeping all sequences aligned
    pub fn push(&mut self, run: RunAggregate) {
        self.clients.push(run.clients);
        self.query.push(run.query_avg);
        self.buy.push(run.buy_avg);
        self.runs.push(run);
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// (client count, average) points of the query series
    pub fn query_points(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.clients.iter().copied().zip(self.query.iter().copied())
    }

    /// (client count, average) points of the buy series
    pub fn buy_points(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.clients.iter().copied().zip(self.buy.iter().copied())
    }

    /// Smallest and largest finite average across both series
    pub fn latency_range(&self) -> Option<(f64, f64)> {
        self.query
            .iter()
            .chain(self.buy.iter())
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<(f64, f64)>, v| {
                Some(acc.map_or((v, v), |(lo, hi)| (lo.min(v), hi.max(v))))
            })
    }
}
