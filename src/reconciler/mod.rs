//! Joining detections to validation rows.
//!
//! Detection and validation file names rarely agree exactly: the classifier
//! appends its own suffixes and annotators often record only the recording
//! name. Rows are paired when either stem is a prefix of the other, and every
//! satisfying pair is emitted.

pub mod command;
mod stem;

pub use stem::{StemRule, stem, stems_match};

use crate::table::{DetectionRecord, MergedRecord, ValidationRecord};
use tracing::debug;

/// Counts reported after reconciliation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    /// Detections paired with at least one validation row.
    pub matched: usize,
    /// Detections without any partner.
    pub unmatched: usize,
    /// Merged rows emitted.
    pub merged: usize,
}

/// Pair every detection with every validation row whose stem prefix-matches.
///
/// Output follows detection order, then validation order. Unmatched
/// detections are dropped.
pub fn reconcile(
    detections: &[DetectionRecord],
    validations: &[ValidationRecord],
    rule: StemRule,
) -> (Vec<MergedRecord>, ReconcileSummary) {
    let validation_stems: Vec<&str> = validations
        .iter()
        .map(|v| stem(&v.file_name, rule))
        .collect();

    let mut merged = Vec::new();
    let mut summary = ReconcileSummary::default();

    for detection in detections {
        let detection_stem = stem(&detection.file_name, rule);
        let before = merged.len();

        merged.extend(
            validations
                .iter()
                .zip(&validation_stems)
                .filter(|(_, validation_stem)| stems_match(detection_stem, validation_stem))
                .map(|(validation, _)| MergedRecord::new(detection, validation)),
        );

        if merged.len() == before {
            debug!(
                "No validation row for {} ({})",
                detection.file_name, detection.common_name
            );
            summary.unmatched += 1;
        } else {
            summary.matched += 1;
        }
    }

    summary.merged = merged.len();
    (merged, summary)
}
