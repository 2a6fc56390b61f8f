//! Core formatting traits and implementations
//!
//! This module defines the output formatting interface and provides
//! a plain text implementation with table formatting capabilities.

use crate::{
    error::Result,
    models::{LatencySeries, RunAggregate},
};
use std::path::Path;

/// Main trait for output formatting
pub trait OutputFormatter {
    /// Format a header section
    fn format_header(&self, title: &str) -> Result<String>;

    /// Format per-run averages as a table
    fn format_series_table(&self, series: &LatencySeries) -> Result<String>;

    /// Format the closing line naming the written chart
    fn format_chart_written(&self, path: &Path) -> Result<String>;

    /// Format warning messages
    fn format_warning(&self, warning: &str) -> Result<String>;
}

/// Configuration options for formatting
#[derive(Debug, Clone)]
pub struct FormattingOptions {
    /// Enable colored output
    pub enable_color: bool,
    /// Show the directory of every run
    pub verbose_mode: bool,
    /// Show table borders
    pub table_borders: bool,
}

impl Default for FormattingOptions {
    fn default() -> Self {
        Self {
            enable_color: true,
            verbose_mode: false,
            table_borders: true,
        }
    }
}

/// Text alignment options
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Alignment {
    Left,
    Right,
}

/// Column definition for table formatting
#[derive(Debug, Clone)]
pub struct Column {
    pub header: String,
    pub alignment: Alignment,
}

impl Column {
    pub fn new(header: &str, alignment: Alignment) -> Self {
        Self {
            header: header.to_string(),
            alignment,
        }
    }
}

/// Row data for table formatting
pub type RowData = Vec<String>;

/// Columns of the per-run table
pub(crate) fn series_columns(verbose: bool) -> Vec<Column> {
    let mut columns = vec![
        Column::new("Clients", Alignment::Right),
        Column::new("Files", Alignment::Right),
        Column::new("Query avg (ms)", Alignment::Right),
        Column::new("Buy avg (ms)", Alignment::Right),
    ];
    if verbose {
        columns.push(Column::new("Directory", Alignment::Left));
    }
    columns
}

/// Average with fixed precision, `n/a` for runs without data
pub(crate) fn format_latency(value: f64) -> String {
    if value.is_nan() {
        "n/a".to_string()
    } else {
        format!("{:.3}", value)
    }
}

pub(crate) fn series_row(run: &RunAggregate, verbose: bool) -> RowData {
    let mut row = vec![
        run.clients.to_string(),
        run.sample_count.to_string(),
        format_latency(run.query_avg),
        format_latency(run.buy_avg),
    ];
    if verbose {
        row.push(run.directory.display().to_string());
    }
    row
}

/// Display width of a cell, ignoring ANSI color sequences
pub(crate) fn visible_width(text: &str) -> usize {
    let mut width = 0;
    let mut in_escape = false;
    for c in text.chars() {
        match (in_escape, c) {
            (false, '\x1b') => in_escape = true,
            (true, 'm') => in_escape = false,
            (true, _) => {}
            (false, _) => width += 1,
        }
    }
    width
}

/// Plain text formatter implementation
pub struct PlainFormatter {
    options: FormattingOptions,
}

impl PlainFormatter {
    /// Create a new plain formatter with options
    pub fn new(options: FormattingOptions) -> Self {
        Self { options }
    }

    /// Create a table with the given columns and data
    pub fn create_table(&self, columns: &[Column], rows: &[RowData]) -> String {
        if rows.is_empty() {
            return String::new();
        }

        let widths = Self::calculate_column_widths(columns, rows);
        let mut output = String::new();

        if self.options.table_borders {
            output.push_str(&Self::create_horizontal_border(&widths));
            output.push('\n');
        }

        let headers: Vec<String> = columns.iter().map(|c| c.header.clone()).collect();
        output.push_str(&self.create_row(&headers, &widths, columns));
        output.push('\n');

        if self.options.table_borders {
            output.push_str(&Self::create_horizontal_border(&widths));
            output.push('\n');
        }

        for row in rows {
            output.push_str(&self.create_row(row, &widths, columns));
            output.push('\n');
        }

        if self.options.table_borders {
            output.push_str(&Self::create_horizontal_border(&widths));
        }

        output
    }

    fn calculate_column_widths(columns: &[Column], rows: &[RowData]) -> Vec<usize> {
        columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                rows.iter()
                    .filter_map(|row| row.get(idx))
                    .map(|cell| visible_width(cell))
                    .fold(column.header.chars().count(), usize::max)
            })
            .collect()
    }

    fn create_horizontal_border(widths: &[usize]) -> String {
        let segments: Vec<String> = widths.iter().map(|w| "-".repeat(w + 2)).collect();
        format!("+{}+", segments.join("+"))
    }

    fn create_row(&self, cells: &[String], widths: &[usize], columns: &[Column]) -> String {
        let formatted: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(idx, &width)| {
                let cell = cells.get(idx).map(String::as_str).unwrap_or("");
                match columns.get(idx).map(|c| c.alignment) {
                    Some(Alignment::Left) | None => format!(" {:<width$} ", cell, width = width),
                    Some(Alignment::Right) => format!(" {:>width$} ", cell, width = width),
                }
            })
            .collect();

        if self.options.table_borders {
            format!("|{}|", formatted.join("|"))
        } else {
            formatted.join(" ").trim_end().to_string()
        }
    }
}

impl OutputFormatter for PlainFormatter {
    fn format_header(&self, title: &str) -> Result<String> {
        Ok(format!("{}\n{}", title, "=".repeat(title.chars().count())))
    }

    fn format_series_table(&self, series: &LatencySeries) -> Result<String> {
        if series.runs.is_empty() {
            return Ok("No runs aggregated.".to_string());
        }

        let verbose = self.options.verbose_mode;
        let rows: Vec<RowData> = series.runs.iter().map(|run| series_row(run, verbose)).collect();
        Ok(self.create_table(&series_columns(verbose), &rows))
    }

    fn format_chart_written(&self, path: &Path) -> Result<String> {
        Ok(format!("Chart written to {}", path.display()))
    }

    fn format_warning(&self, warning: &str) -> Result<String> {
        Ok(format!("Warning: {}", warning))
    }
}
