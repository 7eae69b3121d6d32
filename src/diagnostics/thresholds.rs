//! Per-species confidence thresholds from logistic regression.
//!
//! For each predicted species, correctness is regressed on combined
//! confidence. The threshold is the confidence of the first row, in table
//! order, whose predicted accuracy reaches the target. Species that cannot be
//! fitted get a fallback confidence and are flagged as unfitted.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{info, warn};

use super::{AccuracyGroup, accuracy_groups, unit_samples};
use crate::cli::ThresholdsArgs;
use crate::config::Config;
use crate::constants::output_files::{THRESHOLDS_CSV, VALIDATION_PLOT};
use crate::error::Result;
use crate::output::{OutputOptions, ReportKind, ensure_dir, write_report};
use crate::plot::{SpeciesSeries, render_species_scatter};
use crate::scoring::SynonymTable;
use crate::stats::{LogisticFit, fit_logistic};
use crate::table::{MergedRecord, TableRow, read_table};

/// Threshold of one species.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThresholdResult {
    /// Predicted species.
    #[serde(rename = "Species")]
    pub species: String,
    /// Lowest confidence reaching the target accuracy, or the fallback.
    #[serde(rename = "Confidence")]
    pub confidence: f64,
    /// Whether the confidence came from a fitted model.
    #[serde(rename = "Fitted")]
    pub fitted: bool,
}

impl TableRow for ThresholdResult {
    const HEADER: &'static [&'static str] = &["Species", "Confidence", "Fitted"];
}

/// A threshold together with the model it came from.
#[derive(Debug, Clone)]
pub struct SpeciesThreshold {
    /// Reported threshold.
    pub result: ThresholdResult,
    /// Fitted model, if any.
    pub fit: Option<LogisticFit>,
}

/// Confidence of the first observation whose predicted accuracy reaches
/// `target`.
pub fn first_reaching(points: &[(f64, f64)], fit: &LogisticFit, target: f64) -> Option<f64> {
    points
        .iter()
        .map(|&(x, _)| x)
        .find(|&x| fit.predict(x) >= target)
}

/// Thresholds for every species group.
pub fn find_thresholds(
    groups: &[AccuracyGroup],
    target: f64,
    fallback: f64,
) -> Vec<SpeciesThreshold> {
    groups
        .iter()
        .map(|group| {
            let outcome = fit_logistic(&group.points)
                .map_err(|e| e.to_string())
                .and_then(|fit| {
                    first_reaching(&group.points, &fit, target)
                        .map(|confidence| (fit, confidence))
                        .ok_or_else(|| format!("no detection reaches accuracy {target}"))
                });

            match outcome {
                Ok((fit, confidence)) => SpeciesThreshold {
                    result: ThresholdResult {
                        species: group.species.clone(),
                        confidence,
                        fitted: true,
                    },
                    fit: Some(fit),
                },
                Err(reason) => {
                    warn!(
                        "Error fitting model for {}: {reason}; using confidence {fallback}",
                        group.species
                    );
                    SpeciesThreshold {
                        result: ThresholdResult {
                            species: group.species.clone(),
                            confidence: fallback,
                            fitted: false,
                        },
                        fit: None,
                    }
                }
            }
        })
        .collect()
}

/// Execute the thresholds command.
///
/// # Errors
///
/// Returns an error if the merged table cannot be read or an output cannot be
/// written.
pub fn execute(args: &ThresholdsArgs, config: &Config, options: OutputOptions) -> Result<PathBuf> {
    let merged = args
        .merged
        .clone()
        .unwrap_or_else(|| config.paths.merged_file.clone());
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config.paths.output_dir.clone());
    let target = args.target.unwrap_or(config.thresholds.accuracy_target);

    let records: Vec<MergedRecord> = read_table(&merged)?;
    let synonyms = SynonymTable::new(&config.scoring.synonyms);
    let groups = accuracy_groups(&records, &synonyms);
    let thresholds = find_thresholds(&groups, target, config.thresholds.fallback_confidence);

    for t in &thresholds {
        info!(
            "{}: confidence {:.3}{}",
            t.result.species,
            t.result.confidence,
            if t.result.fitted { "" } else { " (fallback)" }
        );
    }

    ensure_dir(&output_dir)?;
    let rows: Vec<ThresholdResult> = thresholds.iter().map(|t| t.result.clone()).collect();
    let csv_path = output_dir.join(THRESHOLDS_CSV);
    let report = write_report(
        &rows,
        args.format,
        &csv_path,
        &csv_path.with_extension("json"),
        ReportKind::Thresholds,
        &merged,
        options,
    )?;

    let series: Vec<SpeciesSeries> = groups
        .iter()
        .zip(&thresholds)
        .map(|(group, threshold)| SpeciesSeries {
            species: group.species.clone(),
            points: group.points.clone(),
            curve: threshold
                .fit
                .map(|fit| unit_samples(50).map(|x| (x, fit.predict(x))).collect())
                .unwrap_or_default(),
        })
        .collect();
    let plot_path = output_dir.join(VALIDATION_PLOT);
    render_species_scatter(
        &series,
        "Validation Plot for Accuracy vs Combined Confidence",
        &plot_path,
    )?;

    info!("Wrote {} and {}", report.display(), plot_path.display());
    Ok(report)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn overlapping(species: &str) -> AccuracyGroup {
        AccuracyGroup {
            species: species.to_string(),
            points: vec![
                (0.1, 0.0),
                (0.2, 0.0),
                (0.3, 1.0),
                (0.4, 0.0),
                (0.5, 0.0),
                (0.6, 1.0),
                (0.7, 1.0),
                (0.8, 0.0),
                (0.9, 1.0),
                (0.95, 1.0),
            ],
        }
    }

    #[test]
    fn test_threshold_is_first_row_reaching_target() {
        let thresholds = find_thresholds(&[overlapping("Magpie")], 0.5, 0.1);
        assert_eq!(thresholds[0].result.confidence, 0.6);
        assert!(thresholds[0].result.fitted);

        let thresholds = find_thresholds(&[overlapping("Magpie")], 0.8, 0.1);
        assert_eq!(thresholds[0].result.confidence, 0.9);
    }

    #[test]
    fn test_unreachable_target_uses_fallback() {
        let thresholds = find_thresholds(&[overlapping("Magpie")], 0.9, 0.1);
        assert_eq!(thresholds[0].result.confidence, 0.1);
        assert!(!thresholds[0].result.fitted);
        assert!(thresholds[0].fit.is_none());
    }

    #[test]
    fn test_all_true_positives_use_fallback() {
        let group = AccuracyGroup {
            species: "Crow".to_string(),
            points: vec![(0.3, 1.0), (0.6, 1.0), (0.9, 1.0)],
        };
        let thresholds = find_thresholds(&[group, overlapping("Magpie")], 0.5, 0.25);

        assert_eq!(thresholds[0].result.species, "Crow");
        assert_eq!(thresholds[0].result.confidence, 0.25);
        assert!(!thresholds[0].result.fitted);
        assert!(thresholds[1].result.fitted);
    }

    #[test]
    fn test_threshold_follows_table_order() {
        let mut group = overlapping("Magpie");
        group.points.reverse();
        let thresholds = find_thresholds(&[group], 0.5, 0.1);
        assert_eq!(thresholds[0].result.confidence, 0.95);
    }
}
