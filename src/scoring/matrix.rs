//! Square confusion matrix over an ordered label axis.

use super::LabelPair;
use crate::error::{Error, Result};
use std::collections::{BTreeSet, HashMap};

/// Counts of (true, predicted) outcomes.
///
/// Rows are true labels and columns are predicted labels, both in the order
/// of [`ConfusionMatrix::labels`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfusionMatrix {
    labels: Vec<String>,
    index: HashMap<String, usize>,
    counts: Vec<Vec<u64>>,
}

impl ConfusionMatrix {
    /// Build a matrix from label pairs.
    ///
    /// An empty `explicit_labels` uses the sorted union of every label that
    /// occurs. Otherwise the explicit labels form the axis and a pair with a
    /// label outside it is an error.
    pub fn from_pairs(pairs: &[LabelPair], explicit_labels: &[String]) -> Result<Self> {
        let labels: BTreeSet<&str> = if explicit_labels.is_empty() {
            pairs
                .iter()
                .flat_map(|p| [p.truth.as_str(), p.predicted.as_str()])
                .collect()
        } else {
            explicit_labels.iter().map(String::as_str).collect()
        };

        let mut matrix = Self::with_labels(labels.into_iter().map(str::to_string).collect());
        for pair in pairs {
            let row = matrix.position(&pair.truth)?;
            let col = matrix.position(&pair.predicted)?;
            matrix.counts[row][col] += 1;
        }
        Ok(matrix)
    }

    fn with_labels(labels: Vec<String>) -> Self {
        let n = labels.len();
        let index = labels
            .iter()
            .enumerate()
            .map(|(i, label)| (label.clone(), i))
            .collect();
        Self {
            labels,
            index,
            counts: vec![vec![0; n]; n],
        }
    }

    fn position(&self, label: &str) -> Result<usize> {
        self.index
            .get(label)
            .copied()
            .ok_or_else(|| Error::LabelMissing {
                species: label.to_string(),
            })
    }

    /// Axis labels in order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the axis is empty.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Count at (`row`, `col`).
    pub fn count(&self, row: usize, col: usize) -> u64 {
        self.counts[row][col]
    }

    /// Count for a (true, predicted) label pair; unknown labels count zero.
    pub fn get(&self, truth: &str, predicted: &str) -> u64 {
        match (self.index.get(truth), self.index.get(predicted)) {
            (Some(&row), Some(&col)) => self.counts[row][col],
            _ => 0,
        }
    }

    /// Matrix rows.
    pub fn rows(&self) -> &[Vec<u64>] {
        &self.counts
    }

    /// Occurrences of label `i` as truth.
    pub fn row_sum(&self, i: usize) -> u64 {
        self.counts[i].iter().sum()
    }

    /// Occurrences of label `i` as prediction.
    pub fn col_sum(&self, i: usize) -> u64 {
        self.counts.iter().map(|row| row[i]).sum()
    }

    /// Sum of all cells.
    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }

    /// Largest cell value.
    pub fn max_count(&self) -> u64 {
        self.counts.iter().flatten().copied().max().unwrap_or(0)
    }
}
