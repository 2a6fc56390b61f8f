//! Builds the per-run average series

use crate::{
    error::{ErrorContext, Result},
    logging::Logger,
    models::{Config, LatencySeries, RunAggregate},
    source::MeasurementSource,
    stats::{aggregate, parse_measurement_line, RunSamples},
};

/// Walks the configured runs in ascending client order and averages each one
pub struct SeriesBuilder<S> {
    source: S,
    logger: Logger,
}

impl<S: MeasurementSource> SeriesBuilder<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            logger: Logger::new("series"),
        }
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    /// Aggregate every run of `config`. The first failing run aborts the
    /// build and nothing computed so far is returned.
    pub fn build(&self, config: &Config) -> Result<LatencySeries> {
        let mut series = LatencySeries::new();

        for clients in config.runs() {
            let run = self.aggregate_run(config, clients)?;
            series.push(run);
        }

        self.logger
            .debug("built latency series")
            .field("runs", series.len())
            .log();

        Ok(series)
    }

    /// Scan, parse and average the measurement files of one run
    pub fn aggregate_run(&self, config: &Config, clients: u32) -> Result<RunAggregate> {
        let directory = config.run_directory(clients);
        let files = self.source.list_measurements(&directory, &config.extension)?;

        let mut samples = RunSamples::with_capacity(files.len());
        for file in &files {
            let line = self.source.read_first_line(file)?;
            let measurement = parse_measurement_line(&line)
                .with_context(|| file.display().to_string())?;

            self.logger
                .trace("parsed measurement")
                .field("file", file.display().to_string())
                .field("query_ms", measurement.query_ms)
                .field("buy_ms", measurement.buy_ms)
                .log();

            samples.add(measurement);
        }

        let run_name = directory.display().to_string();
        let (query_avg, buy_avg) = aggregate(&samples, config.empty_runs, &run_name)?;

        if samples.is_empty() {
            self.logger
                .warn("run has no measurement files, averages are NaN")
                .field("directory", &run_name)
                .log();
        }

        self.logger
            .info("aggregated run")
            .field("clients", clients)
            .field("files", samples.len())
            .field("query_avg_ms", query_avg)
            .field("buy_avg_ms", buy_avg)
            .log();

        Ok(RunAggregate {
            clients,
            directory,
            query_avg,
            buy_avg,
            sample_count: samples.len(),
        })
    }
}
