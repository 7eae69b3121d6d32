//! Per-species accuracy vs confidence lines.

use std::path::PathBuf;

use serde::Serialize;
use tracing::info;

use super::{AccuracyGroup, accuracy_groups};
use crate::cli::RegressionArgs;
use crate::config::Config;
use crate::constants::output_files::{REGRESSION_CSV, REGRESSION_SVG};
use crate::error::Result;
use crate::output::{OutputOptions, ensure_dir, write_table};
use crate::plot::{SpeciesSeries, render_regression_grid};
use crate::scoring::SynonymTable;
use crate::stats::fit_linear;
use crate::table::{MergedRecord, TableRow, read_table};

/// Fitted line of one species.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegressionLine {
    /// Predicted species.
    #[serde(rename = "Species")]
    pub species: String,
    /// Accuracy at zero confidence.
    #[serde(rename = "Intercept")]
    pub intercept: f64,
    /// Accuracy change per unit confidence.
    #[serde(rename = "Slope")]
    pub slope: f64,
    /// Observations fitted.
    #[serde(rename = "Samples")]
    pub samples: usize,
}

impl TableRow for RegressionLine {
    const HEADER: &'static [&'static str] = &["Species", "Intercept", "Slope", "Samples"];
}

/// Fit one line per species group; empty groups are skipped.
pub fn regression_lines(groups: &[AccuracyGroup]) -> Vec<RegressionLine> {
    groups
        .iter()
        .filter_map(|group| {
            let fit = fit_linear(&group.points)?;
            Some(RegressionLine {
                species: group.species.clone(),
                intercept: fit.intercept,
                slope: fit.slope,
                samples: fit.samples,
            })
        })
        .collect()
}

/// Execute the regression command.
///
/// # Errors
///
/// Returns an error if the merged table cannot be read or an output cannot be
/// written.
pub fn execute(args: &RegressionArgs, config: &Config, options: OutputOptions) -> Result<PathBuf> {
    let merged = args
        .merged
        .clone()
        .unwrap_or_else(|| config.paths.merged_file.clone());
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config.paths.output_dir.clone());

    let records: Vec<MergedRecord> = read_table(&merged)?;
    let synonyms = SynonymTable::new(&config.scoring.synonyms);
    let groups = accuracy_groups(&records, &synonyms);
    let lines = regression_lines(&groups);

    ensure_dir(&output_dir)?;
    let csv_path = output_dir.join(REGRESSION_CSV);
    write_table(&csv_path, &lines, options.csv_bom)?;

    let series: Vec<SpeciesSeries> = groups
        .iter()
        .zip(&lines)
        .map(|(group, line)| {
            let (lo, hi) = group
                .points
                .iter()
                .fold((f64::MAX, f64::MIN), |(lo, hi), &(x, _)| (lo.min(x), hi.max(x)));
            let at = |x: f64| line.slope.mul_add(x, line.intercept);
            SpeciesSeries {
                species: group.species.clone(),
                points: group.points.clone(),
                curve: vec![(lo, at(lo)), (hi, at(hi))],
            }
        })
        .collect();
    let chart_path = output_dir.join(REGRESSION_SVG);
    render_regression_grid(&series, &chart_path)?;

    info!(
        "Fitted {} species; wrote {} and {}",
        lines.len(),
        csv_path.display(),
        chart_path.display()
    );
    Ok(csv_path)
}
