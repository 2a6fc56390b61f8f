//! PNG line chart through the plotters bitmap backend

use super::{ChartSpec, PlotSink};
use crate::{
    error::{AppError, Result},
    logging::Logger,
    models::LatencySeries,
};
use plotters::prelude::*;
use std::error::Error;

const FONT: &str = "sans-serif";
const TITLE_FONT_SIZE: u32 = 22;
const LABEL_FONT_SIZE: u32 = 16;
const STROKE_WIDTH: u32 = 2;
const POINT_SIZE: u32 = 4;
/// Beyond this many runs plotters picks the x ticks itself
const MAX_LABELLED_TICKS: usize = 50;
/// Narrower y ranges break tick layout, as the tick step underflows to zero
const MIN_Y_SPAN: f64 = 1e-300;

/// Draws both series as lines on shared axes and writes a PNG
#[derive(Debug, Clone)]
pub struct PlottersRenderer {
    logger: Logger,
}

impl Default for PlottersRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PlottersRenderer {
    pub fn new() -> Self {
        Self {
            logger: Logger::new("chart"),
        }
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    fn draw(&self, chart: &ChartSpec, series: &LatencySeries) -> std::result::Result<(), Box<dyn Error>> {
        let (x_min, x_max) = x_bounds(series);
        let (y_min, y_max) = y_bounds(series);

        let root = BitMapBackend::new(&chart.output_path, (chart.width, chart.height)).into_drawing_area();
        root.fill(&WHITE)?;

        // One padding tick on each side keeps the first and last points off the frame
        let mut plot = ChartBuilder::on(&root)
            .caption(&chart.title, (FONT, TITLE_FONT_SIZE))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d(x_min.saturating_sub(1)..x_max.saturating_add(1), y_min..y_max)?;

        let tick_count = ((x_max - x_min) as usize).saturating_add(3).min(MAX_LABELLED_TICKS);
        plot.configure_mesh()
            .x_labels(tick_count)
            .x_label_formatter(&|x| {
                if (x_min..=x_max).contains(x) {
                    x.to_string()
                } else {
                    String::new()
                }
            })
            .y_label_formatter(&|y| format_axis_value(*y))
            .x_desc(chart.x_label.as_str())
            .y_desc(chart.y_label.as_str())
            .label_style((FONT, LABEL_FONT_SIZE))
            .bold_line_style(BLACK.mix(0.2))
            .light_line_style(BLACK.mix(0.05))
            .draw()?;

        for (label, color, points) in [
            (chart.query_label.as_str(), BLUE, finite_points(series.query_points())),
            (chart.buy_label.as_str(), RED, finite_points(series.buy_points())),
        ] {
            plot.draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(STROKE_WIDTH)))?
                .label(label)
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(STROKE_WIDTH)));

            plot.draw_series(points.iter().map(|&point| Circle::new(point, POINT_SIZE, color.filled())))?;
        }

        plot.configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .label_font((FONT, LABEL_FONT_SIZE))
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        root.present()?;
        Ok(())
    }
}

impl PlotSink for PlottersRenderer {
    fn render(&self, chart: &ChartSpec, series: &LatencySeries) -> Result<()> {
        if series.is_empty() {
            return Err(AppError::render("no runs to plot"));
        }

        self.draw(chart, series).map_err(|e| {
            AppError::render(format!("failed to draw {} ({})", chart.output_path.display(), e))
        })?;

        self.logger
            .info("wrote chart")
            .field("path", chart.output_path.display().to_string())
            .field("runs", series.len())
            .log();

        Ok(())
    }
}

/// Smallest and largest client count of the series
fn x_bounds(series: &LatencySeries) -> (u32, u32) {
    let min = series.clients.iter().copied().min().unwrap_or(1);
    let max = series.clients.iter().copied().max().unwrap_or(min);
    (min, max)
}

/// Y axis range: always includes 0, padded 10% beyond the finite extremes.
///
/// Both ends stay finite and so does their distance; plotters cannot lay out
/// ticks on an infinite range.
fn y_bounds(series: &LatencySeries) -> (f64, f64) {
    let (lo, hi) = match series.latency_range() {
        Some((lo, hi)) => (lo.min(0.0) * 1.1, hi.max(0.0) * 1.1),
        None => (0.0, 1.0),
    };
    let lo = lo.max(-f64::MAX);
    let hi = hi.min(f64::MAX);

    if hi - lo < MIN_Y_SPAN {
        (0.0, 1.0)
    } else if (hi - lo).is_finite() {
        (lo, hi)
    } else {
        (lo / 2.0, hi / 2.0)
    }
}

fn format_axis_value(value: f64) -> String {
    if value != 0.0 && !(1e-3..1e6).contains(&value.abs()) {
        format!("{:.1e}", value)
    } else {
        format!("{:.1}", value)
    }
}

/// Points that can be drawn; NaN runs leave a gap in the markers
fn finite_points(points: impl Iterator<Item = (u32, f64)>) -> Vec<(u32, f64)> {
    points.filter(|(_, y)| y.is_finite()).collect()
}
