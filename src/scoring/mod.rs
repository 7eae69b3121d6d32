//! Confusion matrix and per-species metrics.
//!
//! One pipeline serves every variant: pairs are extracted once, then the base
//! matrix and optionally the non-bird bucketed matrix are built from them.

pub mod command;
mod matrix;
mod metrics;
mod normalize;
mod pairs;

pub use matrix::ConfusionMatrix;
pub use metrics::{SpeciesMetric, species_metrics};
pub use normalize::{SynonymTable, title_case};
pub use pairs::{LabelPair, bucket_label, bucket_non_bird, label_pairs};

use crate::config::ScoringConfig;
use crate::error::Result;
use crate::table::MergedRecord;
use std::collections::HashSet;

/// Variant selection for one scoring run.
#[derive(Debug, Clone)]
pub struct ScoringOptions {
    /// Fixed label axis (normalized); empty means the observed labels.
    pub labels: Vec<String>,
    /// Also build the non-bird bucketed matrix.
    pub bucket_non_bird: bool,
    /// Split `&`-separated truth into one pair per species.
    pub expand_multi_label: bool,
    /// Truth value marking rows to exclude.
    pub unknown_truth_marker: String,
    /// Normalized labels collapsed into the non-bird bucket.
    pub non_bird_labels: HashSet<String>,
}

impl ScoringOptions {
    /// Options from configuration, with label lists normalized by `synonyms`.
    pub fn from_config(config: &ScoringConfig, synonyms: &SynonymTable) -> Self {
        Self {
            labels: config
                .labels
                .iter()
                .map(|l| synonyms.normalize(l))
                .collect(),
            bucket_non_bird: config.bucket_non_bird,
            expand_multi_label: config.expand_multi_label,
            unknown_truth_marker: config.unknown_truth_marker.trim().to_string(),
            non_bird_labels: config
                .non_bird_labels
                .iter()
                .map(|l| synonyms.normalize(l))
                .collect(),
        }
    }
}

/// A matrix and the metrics derived from it.
#[derive(Debug, Clone)]
pub struct Scorecard {
    /// Outcome counts.
    pub matrix: ConfusionMatrix,
    /// Metrics in axis order.
    pub metrics: Vec<SpeciesMetric>,
}

impl Scorecard {
    fn build(pairs: &[LabelPair], labels: &[String]) -> Result<Self> {
        let matrix = ConfusionMatrix::from_pairs(pairs, labels)?;
        let metrics = species_metrics(&matrix);
        Ok(Self { matrix, metrics })
    }
}

/// Result of a scoring run.
#[derive(Debug, Clone)]
pub struct ScoreReport {
    /// Number of label pairs counted.
    pub pairs: usize,
    /// Species-level matrix.
    pub species: Scorecard,
    /// Matrix with non-bird labels bucketed, when requested.
    pub non_bird: Option<Scorecard>,
}

/// Score merged rows.
///
/// # Errors
///
/// Returns [`crate::Error::LabelMissing`] if an explicit label set does not
/// cover every species that occurs.
pub fn score(
    records: &[MergedRecord],
    synonyms: &SynonymTable,
    options: &ScoringOptions,
) -> Result<ScoreReport> {
    let pairs = label_pairs(records, synonyms, options);
    let species = Scorecard::build(&pairs, &options.labels)?;

    let non_bird = if options.bucket_non_bird {
        let bucketed = bucket_non_bird(&pairs, &options.non_bird_labels);
        let mut labels: Vec<String> = options
            .labels
            .iter()
            .map(|l| bucket_label(l, &options.non_bird_labels))
            .collect();
        labels.sort();
        labels.dedup();
        Some(Scorecard::build(&bucketed, &labels)?)
    } else {
        None
    };

    Ok(ScoreReport {
        pairs: pairs.len(),
        species,
        non_bird,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn merged(predicted: &str, tp_fp: &str, truth: &str) -> MergedRecord {
        MergedRecord {
            file_name: "rec1.wav".to_string(),
            predicted_species: predicted.to_string(),
            tp_fp: tp_fp.to_string(),
            true_species: truth.to_string(),
            ..MergedRecord::default()
        }
    }

    fn setup(config: &ScoringConfig) -> (SynonymTable, ScoringOptions) {
        let synonyms = SynonymTable::new(&config.synonyms);
        let options = ScoringOptions::from_config(config, &synonyms);
        (synonyms, options)
    }

    #[test]
    fn test_magpie_crow_scenario() {
        let (synonyms, options) = setup(&ScoringConfig::default());
        let records = [merged("Magpie", "T", "Magpie"), merged("Crow", "T", "Magpie")];

        let report = score(&records, &synonyms, &options).unwrap();
        let matrix = &report.species.matrix;
        assert_eq!(matrix.get("Magpie", "Magpie"), 1);
        assert_eq!(matrix.get("Magpie", "Crow"), 1);

        let magpie = report
            .species
            .metrics
            .iter()
            .find(|m| m.species == "Magpie")
            .unwrap();
        assert_eq!(magpie.precision, 1.0);
        assert_eq!(magpie.recall, 0.5);
        assert!(report.non_bird.is_none());
    }

    #[test]
    fn test_total_counts_pairs_not_rows() {
        let (synonyms, options) = setup(&ScoringConfig::default());
        let records = [
            merged("Magpie", "F", "Crow & Wind & Insects"),
            merged("Magpie", "T", "Magpie"),
        ];
        let report = score(&records, &synonyms, &options).unwrap();
        assert_eq!(report.pairs, 4);
        assert_eq!(report.species.matrix.total(), 4);
    }

    #[test]
    fn test_non_bird_variant_leaves_base_untouched() {
        let config = ScoringConfig {
            bucket_non_bird: true,
            ..ScoringConfig::default()
        };
        let (synonyms, options) = setup(&config);
        let records = [
            merged("Magpie", "F", "wind"),
            merged("Magpie", "F", "Insects"),
            merged("Magpie", "T", "Magpie"),
        ];

        let report = score(&records, &synonyms, &options).unwrap();
        assert_eq!(report.species.matrix.labels(), ["Insects", "Magpie", "Wind"]);
        assert_eq!(report.species.matrix.get("Wind", "Magpie"), 1);

        let bucketed = report.non_bird.unwrap();
        assert_eq!(bucketed.matrix.labels(), ["Magpie", "Non-bird"]);
        assert_eq!(bucketed.matrix.get("Non-bird", "Magpie"), 2);
        assert_eq!(bucketed.matrix.total(), report.species.matrix.total());
    }

    #[test]
    fn test_explicit_labels_are_normalized() {
        let config = ScoringConfig {
            labels: vec!["magpie".to_string(), "CROW".to_string()],
            ..ScoringConfig::default()
        };
        let (synonyms, options) = setup(&config);
        let records = [merged("crow", "F", "magpie")];

        let report = score(&records, &synonyms, &options).unwrap();
        assert_eq!(report.species.matrix.labels(), ["Crow", "Magpie"]);
    }

    #[test]
    fn test_bucketed_explicit_labels_collapse_to_one_non_bird() {
        let config = ScoringConfig {
            bucket_non_bird: true,
            labels: vec!["Wind".to_string(), "Magpie".to_string(), "Plane".to_string()],
            ..ScoringConfig::default()
        };
        let (synonyms, options) = setup(&config);
        let records = [
            merged("Magpie", "F", "Plane"),
            merged("Magpie", "F", "Wind"),
            merged("Magpie", "T", "Magpie"),
        ];

        let report = score(&records, &synonyms, &options).unwrap();
        assert_eq!(report.species.matrix.labels(), ["Magpie", "Plane", "Wind"]);

        let bucketed = report.non_bird.unwrap();
        assert_eq!(bucketed.matrix.labels(), ["Magpie", "Non-bird"]);
        assert_eq!(bucketed.matrix.get("Non-bird", "Magpie"), 2);
    }

    #[test]
    fn test_corvid_variants_share_a_label() {
        let (synonyms, options) = setup(&ScoringConfig::default());
        let records = [
            merged("Corvid sp.", "T", ""),
            merged("little corvid", "F", "CORVID"),
        ];
        let report = score(&records, &synonyms, &options).unwrap();
        assert_eq!(report.species.matrix.labels(), ["Corvid"]);
        assert_eq!(report.species.matrix.get("Corvid", "Corvid"), 2);
    }
}
