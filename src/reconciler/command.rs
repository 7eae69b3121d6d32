//! Reconcile command execution.

use std::path::PathBuf;

use tracing::info;

use crate::cli::ReconcileArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::{OutputOptions, write_table};
use crate::table::{DetectionRecord, ValidationRecord, read_table};

use super::reconcile;

/// Execute the reconcile command.
///
/// # Errors
///
/// Returns an error if either input table cannot be read or the merged table
/// cannot be written.
pub fn execute(args: &ReconcileArgs, config: &Config, options: OutputOptions) -> Result<PathBuf> {
    let combined = args
        .combined
        .clone()
        .unwrap_or_else(|| config.paths.combined_file.clone());
    let validation = args
        .validation
        .clone()
        .unwrap_or_else(|| config.paths.validation_file.clone());
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| config.paths.merged_file.clone());
    let rule = args.stem_rule.unwrap_or(config.matching.stem_rule);

    let detections: Vec<DetectionRecord> = read_table(&combined)?;
    let validations: Vec<ValidationRecord> = read_table(&validation)?;
    info!(
        "Reconciling {} detections against {} validation rows ({rule} stems)",
        detections.len(),
        validations.len()
    );

    let (merged, summary) = reconcile(&detections, &validations, rule);
    write_table(&output, &merged, options.csv_bom)?;

    info!(
        "Wrote {} merged rows to {} ({} detections matched, {} dropped)",
        summary.merged,
        output.display(),
        summary.matched,
        summary.unmatched
    );

    Ok(output)
}
