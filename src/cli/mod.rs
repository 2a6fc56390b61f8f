//! Command-line interface

use clap::Parser;
use std::path::PathBuf;

/// Latency Grapher - averages per-run query/buy latencies and plots them against client count
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "latency-grapher")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory containing one <prefix><n> subdirectory per run [default: out]
    #[arg(long, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// First client count to aggregate [default: 1]
    #[arg(long, value_name = "N")]
    pub first_run: Option<u32>,

    /// Last client count to aggregate [default: 10]
    #[arg(long, value_name = "N")]
    pub last_run: Option<u32>,

    /// Chart image path [default: latencies.png]
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// How to handle runs without measurement files (error, nan)
    #[arg(long, value_name = "POLICY")]
    pub empty_runs: Option<String>,

    /// Chart title
    #[arg(long)]
    pub title: Option<String>,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,

    /// Print the averaged series as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Validate CLI arguments for conflicts and requirements
    pub fn validate(&self) -> Result<(), String> {
        if let (Some(first), Some(last)) = (self.first_run, self.last_run) {
            if first > last {
                return Err(format!("--first-run ({}) cannot be greater than --last-run ({})", first, last));
            }
        }

        if self.first_run == Some(0) {
            return Err("--first-run must be at least 1".to_string());
        }

        if let Some(ref policy) = self.empty_runs {
            if policy.parse::<crate::models::EmptyRunPolicy>().is_err() {
                return Err(format!("Invalid --empty-runs value '{}': expected 'error' or 'nan'", policy));
            }
        }

        if let Some(ref output) = self.output {
            if output.as_os_str().is_empty() {
                return Err("--output cannot be empty".to_string());
            }
        }

        Ok(())
    }

    /// Check if colors should be enabled
    pub fn use_colors(&self) -> bool {
        !self.no_color && supports_color()
    }
}

/// Whether stdout looks like a color-capable terminal
pub fn supports_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    match std::env::var("TERM") {
        Ok(term) => term != "dumb",
        Err(_) => cfg!(windows),
    }
}
