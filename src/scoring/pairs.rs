//! Extraction of (true, predicted) label pairs from merged rows.

use super::{ScoringOptions, SynonymTable};
use crate::constants::scoring::{NON_BIRD_LABEL, TRUTH_SEPARATOR};
use crate::table::{MergedRecord, Verdict};
use std::collections::HashSet;

/// One outcome counted in the confusion matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelPair {
    /// Species actually present.
    pub truth: String,
    /// Species the classifier reported.
    pub predicted: String,
}

impl LabelPair {
    /// Create a pair.
    pub fn new(truth: impl Into<String>, predicted: impl Into<String>) -> Self {
        Self {
            truth: truth.into(),
            predicted: predicted.into(),
        }
    }
}

/// Turn decided merged rows into normalized label pairs.
///
/// Rows whose truth is the unknown marker are skipped. With multi-label
/// expansion a truth of `A & B` yields one pair per species. An empty truth
/// on a true positive falls back to the predicted species.
pub fn label_pairs(
    records: &[MergedRecord],
    synonyms: &SynonymTable,
    options: &ScoringOptions,
) -> Vec<LabelPair> {
    let mut pairs = Vec::new();

    for record in records {
        let verdict = record.verdict();
        if !verdict.is_decided() {
            continue;
        }
        let raw_truth = record.true_species.trim();
        if raw_truth == options.unknown_truth_marker {
            continue;
        }
        let predicted = synonyms.normalize(&record.predicted_species);
        if predicted.is_empty() {
            continue;
        }

        let truths: Vec<String> = if options.expand_multi_label {
            raw_truth
                .split(TRUTH_SEPARATOR)
                .map(|part| synonyms.normalize(part))
                .filter(|truth| !truth.is_empty())
                .collect()
        } else {
            Some(synonyms.normalize(raw_truth))
                .filter(|truth| !truth.is_empty())
                .into_iter()
                .collect()
        };

        if truths.is_empty() {
            if verdict == Verdict::TruePositive {
                pairs.push(LabelPair::new(predicted.clone(), predicted));
            }
            continue;
        }

        pairs.extend(
            truths
                .into_iter()
                .map(|truth| LabelPair::new(truth, predicted.clone())),
        );
    }

    pairs
}

/// Replace non-bird labels with the single non-bird bucket.
///
/// `non_bird` holds normalized labels.
pub fn bucket_non_bird(pairs: &[LabelPair], non_bird: &HashSet<String>) -> Vec<LabelPair> {
    pairs
        .iter()
        .map(|pair| {
            LabelPair::new(
                bucket_label(&pair.truth, non_bird),
                bucket_label(&pair.predicted, non_bird),
            )
        })
        .collect()
}

/// Bucketed form of a single label.
pub fn bucket_label(label: &str, non_bird: &HashSet<String>) -> String {
    if non_bird.contains(label) {
        NON_BIRD_LABEL.to_string()
    } else {
        label.to_string()
    }
}
