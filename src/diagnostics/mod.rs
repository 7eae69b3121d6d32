//! Supplementary diagnostics: confidence thresholds, accuracy regressions,
//! detection timelines, frequency ranges and species folder summaries.

pub mod folder_summary;
pub mod frequency;
pub mod regression;
pub mod thresholds;
pub mod timeline;

use crate::scoring::SynonymTable;
use crate::table::MergedRecord;
use std::collections::BTreeMap;

/// `(combined confidence, accuracy)` observations of one predicted species.
#[derive(Debug, Clone, PartialEq)]
pub struct AccuracyGroup {
    /// Normalized predicted species.
    pub species: String,
    /// Observations in table order.
    pub points: Vec<(f64, f64)>,
}

/// Group decided merged rows by normalized predicted species.
///
/// Groups are sorted by species. Rows that are undecided, have no species,
/// or have no parseable combined confidence are skipped.
pub fn accuracy_groups(records: &[MergedRecord], synonyms: &SynonymTable) -> Vec<AccuracyGroup> {
    let mut groups: BTreeMap<String, Vec<(f64, f64)>> = BTreeMap::new();

    for record in records {
        let verdict = record.verdict();
        if !verdict.is_decided() {
            continue;
        }
        let Some(confidence) = record.combined_confidence() else {
            continue;
        };
        let species = synonyms.normalize(&record.predicted_species);
        if species.is_empty() {
            continue;
        }
        groups
            .entry(species)
            .or_default()
            .push((confidence, verdict.accuracy()));
    }

    groups
        .into_iter()
        .map(|(species, points)| AccuracyGroup { species, points })
        .collect()
}

/// Evenly spaced sample positions across `0.0..=1.0`.
#[allow(clippy::cast_precision_loss)]
fn unit_samples(count: usize) -> impl Iterator<Item = f64> {
    let last = count.saturating_sub(1).max(1) as f64;
    (0..count).map(move |i| i as f64 / last)
}
