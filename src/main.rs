//! Latency Grapher - Main CLI Application
//!
//! Reads `<base>/clients_<n>/*.txt` for every configured run, averages the
//! query and buy latencies, writes the chart and prints a per-run summary.

use clap::Parser;
use latency_grapher::{
    build_info,
    chart::PlottersRenderer,
    cli::Cli,
    config::{display_config_summary, load_config, validate_config},
    error::{AppError, Result},
    logging::Logger,
    output::OutputCoordinator,
    source::FileSystemSource,
    Pipeline,
};
use std::process;

fn main() {
    // Set up better panic handling
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
        process::exit(99);
    }));

    let cli = Cli::parse();

    if let Err(message) = cli.validate() {
        eprintln!("Error: {}", message);
        process::exit(2);
    }

    let use_color = cli.use_colors();
    if let Err(e) = run_application(cli) {
        eprintln!("{}", e.format_for_console(use_color));
        print_error_suggestions(&e);
        process::exit(e.exit_code());
    }
}

/// Main application logic
fn run_application(cli: Cli) -> Result<()> {
    let debug = cli.debug;
    let use_color = cli.use_colors();

    if debug {
        eprintln!("{}", build_info());
        eprintln!("Debug mode enabled");
    }

    // Load and validate configuration
    let mut config = load_config(cli)?;
    config.enable_color = config.enable_color && use_color;
    let warnings = validate_config(&config)?;

    if config.debug {
        eprintln!("\nConfiguration Summary:");
        eprintln!("{}\n", display_config_summary(&config));
    }

    for warning in &warnings {
        eprintln!("{}", warning.format(config.enable_color));
    }

    let logger = Logger::with_config("latency-grapher", &config);
    let renderer = PlottersRenderer::new().with_logger(logger.child("chart"));
    let pipeline = Pipeline::new(config.clone(), FileSystemSource::new(), renderer);

    let series = pipeline.run()?;

    let coordinator = OutputCoordinator::from_config(&config);
    println!("{}", coordinator.display_results(&series, &config)?);

    Ok(())
}

/// Print helpful suggestions for common errors
fn print_error_suggestions(error: &AppError) {
    let message = error.user_friendly_message();
    if let Some((_, suggestion)) = message.split_once("\n\n") {
        eprintln!();
        eprintln!("{}", suggestion);
    }
}
