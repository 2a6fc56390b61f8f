//! Configuration parsing from CLI arguments and environment variables

use crate::{
    cli::Cli,
    models::Config,
    error::Result,
    config::env::EnvManager,
};

/// Configuration parser that combines CLI arguments with environment variables
pub struct ConfigParser {
    cli: Cli,
}

impl ConfigParser {
    /// Create a new configuration parser with CLI arguments
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Parse and build the complete configuration
    pub fn parse(&self) -> Result<Config> {
        // Start with default configuration
        let mut config = Config::default();

        // Load from environment file if it exists
        EnvManager::load_env_file(self.cli.debug)?;

        // Merge environment variables into config
        config.merge_from_env()?;

        // Override with CLI arguments
        self.apply_cli_overrides(&mut config)?;

        // Validate the final configuration
        config.validate()?;

        Ok(config)
    }

    /// Apply CLI argument overrides to configuration
    pub fn apply_cli_overrides(&self, config: &mut Config) -> Result<()> {
        if let Some(ref base_dir) = self.cli.base_dir {
            config.base_dir = base_dir.clone();
        }

        if let Some(first_run) = self.cli.first_run {
            config.first_run = first_run;
        }

        if let Some(last_run) = self.cli.last_run {
            config.last_run = last_run;
        }

        if let Some(ref output) = self.cli.output {
            config.output_path = output.clone();
        }

        if let Some(ref policy) = self.cli.empty_runs {
            config.empty_runs = policy.parse()?;
        }

        if let Some(ref title) = self.cli.title {
            config.title = title.clone();
        }

        if let Some(width) = self.cli.width {
            config.width = width;
        }

        if let Some(height) = self.cli.height {
            config.height = height;
        }

        if self.cli.no_color {
            config.enable_color = false;
        }

        // CLI-only flags
        config.verbose = self.cli.verbose;
        config.debug = self.cli.debug;
        config.json = self.cli.json;

        if config.debug {
            eprintln!("Applied CLI overrides to configuration");
            eprintln!("Final config: base_dir={}, runs={}..={}, output={}",
                    config.base_dir.display(), config.first_run, config.last_run, config.output_path.display());
        }

        Ok(())
    }
}

/// Convenience function to load complete configuration from CLI arguments
pub fn load_config(cli: Cli) -> Result<Config> {
    let parser = ConfigParser::new(cli);
    parser.parse()
}

/// Display configuration summary for debug purposes
pub fn display_config_summary(config: &Config) -> String {
    let mut summary = Vec::new();

    summary.push(format!("Base Directory: {}", config.base_dir.display()));
    summary.push(format!("Runs: {}{}..{}{} ({} runs)",
        config.run_prefix, config.first_run, config.run_prefix, config.last_run, config.run_count()));
    summary.push(format!("Measurement Files: *.{}", config.extension));
    summary.push(format!("Empty Runs: {}", config.empty_runs));
    summary.push(format!("Output: {} ({}x{})", config.output_path.display(), config.width, config.height));
    summary.push(format!("Color Output: {}", config.enable_color));
    summary.push(format!("Verbose: {}", config.verbose));
    summary.push(format!("Debug: {}", config.debug));

    summary.join("\n")
}
