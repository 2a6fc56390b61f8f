//! Colored formatter implementation with terminal color support

use crate::{
    error::Result,
    models::LatencySeries,
};
use super::formatter::{
    series_columns, series_row, FormattingOptions, OutputFormatter, PlainFormatter, RowData,
};
use colored::*;
use std::path::Path;

/// Latency classification for color coding
#[derive(Debug, Clone, PartialEq)]
pub enum PerformanceLevel {
    Excellent,  // < 50ms
    Good,       // 50-100ms
    Fair,       // 100-300ms
    Poor,       // 300-1000ms
    VeryPoor,   // > 1000ms
}

impl PerformanceLevel {
    /// Determine performance level from latency in milliseconds
    pub fn from_latency(time_ms: f64) -> Self {
        if time_ms < 50.0 {
            Self::Excellent
        } else if time_ms < 100.0 {
            Self::Good
        } else if time_ms < 300.0 {
            Self::Fair
        } else if time_ms < 1000.0 {
            Self::Poor
        } else {
            Self::VeryPoor
        }
    }

    /// Get color for this performance level
    pub fn color(&self) -> Color {
        match self {
            Self::Excellent => Color::Green,
            Self::Good => Color::Cyan,
            Self::Fair => Color::Yellow,
            Self::Poor => Color::Magenta,
            Self::VeryPoor => Color::Red,
        }
    }
}

/// Color scheme configuration
#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub header: Color,
    pub success: Color,
    pub warning: Color,
    pub muted: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            header: Color::Blue,
            success: Color::Green,
            warning: Color::Yellow,
            muted: Color::BrightBlack,
        }
    }
}

/// Colored formatter implementation
pub struct ColoredFormatter {
    plain_formatter: PlainFormatter,
    options: FormattingOptions,
    color_scheme: ColorScheme,
}

impl ColoredFormatter {
    /// Create a new colored formatter with options
    pub fn new(options: FormattingOptions) -> Self {
        Self {
            plain_formatter: PlainFormatter::new(options.clone()),
            options,
            color_scheme: ColorScheme::default(),
        }
    }

    /// Apply color to text if colors are enabled
    fn colorize(&self, text: &str, color: Color) -> ColoredString {
        if self.options.enable_color {
            text.color(color)
        } else {
            text.normal()
        }
    }

    /// Color a latency cell by its performance band, padded to `width`
    fn latency_cell(&self, cell: &str, value: f64, width: usize) -> String {
        let padded = format!("{:>width$}", cell, width = width);
        if value.is_nan() {
            self.colorize(&padded, self.color_scheme.muted).to_string()
        } else {
            self.colorize(&padded, PerformanceLevel::from_latency(value).color()).to_string()
        }
    }
}

impl OutputFormatter for ColoredFormatter {
    fn format_header(&self, title: &str) -> Result<String> {
        let underline = "=".repeat(title.chars().count());
        Ok(format!(
            "{}\n{}",
            self.colorize(title, self.color_scheme.header).bold(),
            self.colorize(&underline, self.color_scheme.header)
        ))
    }

    fn format_series_table(&self, series: &LatencySeries) -> Result<String> {
        if series.runs.is_empty() || !self.options.enable_color {
            return self.plain_formatter.format_series_table(series);
        }

        let verbose = self.options.verbose_mode;
        let columns = series_columns(verbose);
        let plain_rows: Vec<RowData> = series.runs.iter().map(|run| series_row(run, verbose)).collect();

        // Widths come from the uncolored text so escape codes do not skew alignment
        let query_width = plain_rows.iter().map(|r| r[2].len()).fold(columns[2].header.len(), usize::max);
        let buy_width = plain_rows.iter().map(|r| r[3].len()).fold(columns[3].header.len(), usize::max);

        let rows: Vec<RowData> = series
            .runs
            .iter()
            .zip(plain_rows)
            .map(|(run, mut row)| {
                row[2] = self.latency_cell(&row[2], run.query_avg, query_width);
                row[3] = self.latency_cell(&row[3], run.buy_avg, buy_width);
                row
            })
            .collect();

        let table = self.plain_formatter.create_table(&columns, &rows);
        Ok(table)
    }

    fn format_chart_written(&self, path: &Path) -> Result<String> {
        Ok(format!(
            "{} {}",
            self.colorize("Chart written to", self.color_scheme.success),
            path.display().to_string().bold()
        ))
    }

    fn format_warning(&self, warning: &str) -> Result<String> {
        Ok(format!("{} {}", self.colorize("Warning:", self.color_scheme.warning).bold(), warning))
    }
}
