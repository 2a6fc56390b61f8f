//! Main pipeline orchestration: scan, aggregate, then render

use crate::{
    chart::{ChartSpec, PlotSink},
    error::Result,
    logging::Logger,
    models::{Config, LatencySeries},
    series::SeriesBuilder,
    source::MeasurementSource,
};

/// Connects a measurement source and a plot sink under one configuration
pub struct Pipeline<S, P> {
    config: Config,
    builder: SeriesBuilder<S>,
    sink: P,
    logger: Logger,
}

impl<S: MeasurementSource, P: PlotSink> Pipeline<S, P> {
    pub fn new(config: Config, source: S, sink: P) -> Self {
        let logger = Logger::with_config("pipeline", &config);
        let builder = SeriesBuilder::new(source).with_logger(logger.child("series"));
        Self {
            config,
            builder,
            sink,
            logger,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build the series for every run and render it.
    ///
    /// The chart is only rendered once all runs aggregated successfully; on
    /// any earlier failure the sink is never called.
    pub fn run(&self) -> Result<LatencySeries> {
        self.logger
            .info("aggregating runs")
            .field("base_dir", self.config.base_dir.display().to_string())
            .field("first_run", self.config.first_run)
            .field("last_run", self.config.last_run)
            .log();

        let series = self.builder.build(&self.config).map_err(|e| {
            self.logger
                .error("aggregation failed, no chart written")
                .field("category", e.category())
                .log();
            e
        })?;

        let chart = ChartSpec::from_config(&self.config);
        self.sink.render(&chart, &series)?;

        Ok(series)
    }
}
