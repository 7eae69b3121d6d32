//! Collect command execution.

use std::path::PathBuf;

use tracing::info;

use crate::cli::CollectArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::{OutputOptions, write_table};

use super::{CollectMode, ValidationIndex, collect_labelled, collect_unlabelled};

/// Execute the collect command.
///
/// # Errors
///
/// Returns an error if the root is missing or a table cannot be read or
/// written.
pub fn execute(args: &CollectArgs, config: &Config, options: OutputOptions) -> Result<PathBuf> {
    let validation_path = args
        .validation
        .clone()
        .unwrap_or_else(|| config.paths.validation_file.clone());
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| config.paths.combined_file.clone());

    let validation = ValidationIndex::load(&validation_path)?;
    info!(
        "Loaded {} validated files from {}",
        validation.len(),
        validation_path.display()
    );

    let summary = match args.mode {
        CollectMode::Unlabelled => {
            let (records, summary) = collect_unlabelled(&args.root, &validation, options.progress)?;
            write_table(&output, &records, options.csv_bom)?;
            summary
        }
        CollectMode::Labelled => {
            let (records, summary) = collect_labelled(&args.root, &validation, options.progress)?;
            write_table(&output, &records, options.csv_bom)?;
            summary
        }
    };

    info!(
        "Collected {} detections from {} tables ({} tables, {} rows skipped) into {}",
        summary.rows,
        summary.tables_read,
        summary.tables_skipped,
        summary.rows_skipped,
        output.display()
    );

    Ok(output)
}
