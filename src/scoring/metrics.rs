//! Per-species precision, recall and F1.

use super::ConfusionMatrix;
use crate::table::TableRow;
use serde::Serialize;

/// Scores of one species.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeciesMetric {
    /// Species label.
    #[serde(rename = "Species")]
    pub species: String,
    /// Correct predictions over all predictions of the species.
    #[serde(rename = "Precision")]
    pub precision: f64,
    /// Correct predictions over all true occurrences of the species.
    #[serde(rename = "Recall")]
    pub recall: f64,
    /// Harmonic mean of precision and recall.
    #[serde(rename = "F1-score")]
    pub f1: f64,
}

impl TableRow for SpeciesMetric {
    const HEADER: &'static [&'static str] = &["Species", "Precision", "Recall", "F1-score"];
}

/// Metrics for every label of the matrix, in axis order.
///
/// Zero denominators yield zero rather than NaN.
#[allow(clippy::cast_precision_loss)]
pub fn species_metrics(matrix: &ConfusionMatrix) -> Vec<SpeciesMetric> {
    matrix
        .labels()
        .iter()
        .enumerate()
        .map(|(i, species)| {
            let hits = matrix.count(i, i) as f64;
            let predicted = matrix.col_sum(i);
            let actual = matrix.row_sum(i);

            let precision = if predicted == 0 { 0.0 } else { hits / predicted as f64 };
            let recall = if actual == 0 { 0.0 } else { hits / actual as f64 };
            let f1 = if precision + recall > 0.0 {
                2.0 * precision * recall / (precision + recall)
            } else {
                0.0
            };

            SpeciesMetric {
                species: species.clone(),
                precision,
                recall,
                f1,
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::scoring::LabelPair;

    #[test]
    fn test_zero_denominators() {
        // Brolga is only ever true, Crow only ever predicted.
        let pairs = [LabelPair::new("Brolga", "Crow")];
        let matrix = ConfusionMatrix::from_pairs(&pairs, &[]).unwrap();
        let metrics = species_metrics(&matrix);

        let brolga = &metrics[0];
        assert_eq!(brolga.species, "Brolga");
        assert_eq!(brolga.precision, 0.0);
        assert_eq!(brolga.recall, 0.0);
        assert_eq!(brolga.f1, 0.0);

        let crow = &metrics[1];
        assert_eq!(crow.precision, 0.0);
        assert_eq!(crow.recall, 0.0);
        assert!(!crow.f1.is_nan());
    }

    #[test]
    fn test_values() {
        let pairs = [
            LabelPair::new("Magpie", "Magpie"),
            LabelPair::new("Magpie", "Magpie"),
            LabelPair::new("Magpie", "Crow"),
            LabelPair::new("Crow", "Magpie"),
        ];
        let matrix = ConfusionMatrix::from_pairs(&pairs, &[]).unwrap();
        let metrics = species_metrics(&matrix);
        let magpie = metrics.iter().find(|m| m.species == "Magpie").unwrap();

        assert!((magpie.precision - 2.0 / 3.0).abs() < 1e-12);
        assert!((magpie.recall - 2.0 / 3.0).abs() < 1e-12);
        assert!((magpie.f1 - 2.0 / 3.0).abs() < 1e-12);
    }
}
