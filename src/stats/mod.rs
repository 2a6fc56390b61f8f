//! Measurement line parsing and per-run averaging

use crate::{
    error::{AppError, Result},
    models::{EmptyRunPolicy, Measurement},
};

/// Collected latencies of one run, one entry per measurement file
#[derive(Debug, Clone, Default)]
pub struct RunSamples {
    pub query: Vec<f64>,
    pub buy: Vec<f64>,
}

impl RunSamples {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            query: Vec::with_capacity(capacity),
            buy: Vec::with_capacity(capacity),
        }
    }

    pub fn add(&mut self, measurement: Measurement) {
        self.query.push(measurement.query_ms);
        self.buy.push(measurement.buy_ms);
    }

    pub fn len(&self) -> usize {
        self.query.len()
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
    }
}

impl FromIterator<Measurement> for RunSamples {
    fn from_iter<I: IntoIterator<Item = Measurement>>(iter: I) -> Self {
        let mut samples = Self::new();
        for measurement in iter {
            samples.add(measurement);
        }
        samples
    }
}

/// Parse a `<query_ms>,<buy_ms>` line.
///
/// Surrounding whitespace is ignored, both on the line and on each field.
/// Anything other than exactly two float fields is a parse error.
pub fn parse_measurement_line(line: &str) -> Result<Measurement> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(AppError::parse("empty measurement line, expected '<query>,<buy>'"));
    }

    let fields: Vec<&str> = trimmed.split(',').collect();
    if fields.len() != 2 {
        return Err(AppError::parse(format!(
            "expected 2 comma-separated fields, found {} in '{}'",
            fields.len(),
            trimmed
        )));
    }

    let query_ms = parse_field(fields[0], "query", trimmed)?;
    let buy_ms = parse_field(fields[1], "buy", trimmed)?;

    Ok(Measurement::new(query_ms, buy_ms))
}

fn parse_field(field: &str, name: &str, line: &str) -> Result<f64> {
    field.trim().parse::<f64>().map_err(|e| {
        AppError::parse(format!("invalid {} latency '{}' in '{}': {}", name, field.trim(), line, e))
    })
}

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Mean query and buy latency of one run.
///
/// `run` only names the run in the error raised for an empty run under
/// [`EmptyRunPolicy::Error`].
pub fn aggregate(samples: &RunSamples, policy: EmptyRunPolicy, run: &str) -> Result<(f64, f64)> {
    match (mean(&samples.query), mean(&samples.buy)) {
        (Some(query_avg), Some(buy_avg)) => Ok((query_avg, buy_avg)),
        _ => match policy {
            EmptyRunPolicy::Error => Err(AppError::statistics(format!(
                "{} has no measurement files to average",
                run
            ))),
            EmptyRunPolicy::Nan => Ok((f64::NAN, f64::NAN)),
        },
    }
}

// Property-based and edge case tests in separate module
#[cfg(test)]
mod comprehensive_tests;
