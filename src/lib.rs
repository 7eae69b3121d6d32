//! Birdval - validation of bird-call detections against hand-labeled data.
//!
//! The pipeline runs in three file-connected stages: [`collector`] combines
//! per-recording detection tables, [`reconciler`] joins them to validation
//! rows, and [`scoring`] builds confusion matrices and per-species metrics.
//! [`diagnostics`] adds threshold, regression and chart commands on top.

#![warn(missing_docs)]

pub mod cli;
pub mod collector;
pub mod config;
pub mod constants;
pub mod diagnostics;
pub mod error;
pub mod output;
pub mod plot;
pub mod reconciler;
pub mod scoring;
pub mod stats;
pub mod table;

use clap::Parser;
use cli::{Cli, Command, ConfigAction, GlobalArgs};
use config::{
    Config, config_file_path, load_config_file, load_default_config, save_config,
    validate_config,
};
use output::OutputOptions;
use std::path::PathBuf;
use tracing::debug;

pub use error::{Error, Result};

/// Main entry point for birdval CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.global.verbose, cli.global.quiet);

    if let Command::Config { action } = cli.command {
        return handle_config_command(action, cli.global.config.as_ref());
    }

    let config = load_config(&cli.global)?;
    let options = OutputOptions {
        csv_bom: !cli.global.no_csv_bom,
        progress: !cli.global.quiet && !cli.global.no_progress,
    };

    handle_command(&cli.command, &config, options)
}

/// Load and validate the configuration selected by `--config` or the
/// platform default.
fn load_config(global: &GlobalArgs) -> Result<Config> {
    let config = match &global.config {
        Some(path) => {
            debug!("Loading configuration from {}", path.display());
            load_config_file(path)?
        }
        None => load_default_config()?,
    };
    validate_config(&config)?;
    Ok(config)
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    fmt().with_env_filter(filter).with_target(false).init();
}

fn handle_command(command: &Command, config: &Config, options: OutputOptions) -> Result<()> {
    match command {
        Command::Collect(args) => collector::command::execute(args, config, options).map(drop),
        Command::Reconcile(args) => reconciler::command::execute(args, config, options).map(drop),
        Command::Score(args) => scoring::command::execute(args, config, options),
        Command::Thresholds(args) => {
            diagnostics::thresholds::execute(args, config, options).map(drop)
        }
        Command::Regression(args) => {
            diagnostics::regression::execute(args, config, options).map(drop)
        }
        Command::Timeline(args) => diagnostics::timeline::execute(args, config, options).map(drop),
        Command::Frequency(args) => {
            diagnostics::frequency::execute(args, config, options).map(drop)
        }
        Command::FolderSummary(args) => {
            diagnostics::folder_summary::execute(args, config, options).map(drop)
        }
        Command::Config { action } => handle_config_command(*action, None),
    }
}

fn handle_config_command(action: ConfigAction, explicit: Option<&PathBuf>) -> Result<()> {
    let path = match explicit {
        Some(path) => path.clone(),
        None => config_file_path()?,
    };

    match action {
        ConfigAction::Init { force } => {
            if path.exists() && !force {
                println!("Configuration file already exists: {}", path.display());
                println!("Use --force to overwrite it with the defaults.");
            } else {
                save_config(&Config::default(), &path)?;
                println!("Created configuration file: {}", path.display());
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_config_file(&path)?;
            validate_config(&config)?;
            let contents =
                toml::to_string_pretty(&config).map_err(|e| Error::ConfigSerialize { source: e })?;
            println!("# {}", path.display());
            print!("{contents}");
            Ok(())
        }
        ConfigAction::Path => {
            println!("{}", path.display());
            Ok(())
        }
    }
}
