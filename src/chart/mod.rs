//! Chart rendering
//!
//! [`PlotSink`] is the seam between the pipeline and the graphics backend.
//! [`PlottersRenderer`] writes a PNG through `plotters`; [`RecordingSink`]
//! only remembers what it was asked to draw.

mod plotters_renderer;

pub use plotters_renderer::PlottersRenderer;

use crate::{
    defaults,
    error::Result,
    models::{Config, LatencySeries},
};
use std::cell::RefCell;
use std::path::PathBuf;

/// Everything about the chart except the data
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub output_path: PathBuf,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub query_label: String,
    pub buy_label: String,
    pub width: u32,
    pub height: u32,
}

impl Default for ChartSpec {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(defaults::DEFAULT_OUTPUT_PATH),
            title: defaults::DEFAULT_TITLE.to_string(),
            x_label: defaults::DEFAULT_X_LABEL.to_string(),
            y_label: defaults::DEFAULT_Y_LABEL.to_string(),
            query_label: defaults::QUERY_SERIES_LABEL.to_string(),
            buy_label: defaults::BUY_SERIES_LABEL.to_string(),
            width: defaults::DEFAULT_WIDTH,
            height: defaults::DEFAULT_HEIGHT,
        }
    }
}

impl ChartSpec {
    pub fn from_config(config: &Config) -> Self {
        Self {
            output_path: config.output_path.clone(),
            title: config.title.clone(),
            width: config.width,
            height: config.height,
            ..Self::default()
        }
    }
}

/// Something that can turn a latency series into a chart
pub trait PlotSink {
    fn render(&self, chart: &ChartSpec, series: &LatencySeries) -> Result<()>;
}

impl<P: PlotSink + ?Sized> PlotSink for &P {
    fn render(&self, chart: &ChartSpec, series: &LatencySeries) -> Result<()> {
        (**self).render(chart, series)
    }
}

/// Records render calls instead of drawing
#[derive(Debug, Default)]
pub struct RecordingSink {
    calls: RefCell<Vec<(ChartSpec, LatencySeries)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render_count(&self) -> usize {
        self.calls.borrow().len()
    }

    /// The most recent render call, if any
    pub fn last(&self) -> Option<(ChartSpec, LatencySeries)> {
        self.calls.borrow().last().cloned()
    }
}

impl PlotSink for RecordingSink {
    fn render(&self, chart: &ChartSpec, series: &LatencySeries) -> Result<()> {
        self.calls.borrow_mut().push((chart.clone(), series.clone()));
        Ok(())
    }
}
