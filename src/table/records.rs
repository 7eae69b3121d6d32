//! Row types for the detection, validation and merged tables.
//!
//! Every field defaults to the empty string so that a missing column or a
//! short row never drops the record.

use serde::{Deserialize, Serialize};

/// A row type with a fixed output header.
pub trait TableRow: Serialize {
    /// Column names in serialization order.
    const HEADER: &'static [&'static str];
}

/// A row of a per-recording classifier table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ClassifierRow {
    /// Recording named by the table itself, when it has a `File` column.
    #[serde(rename = "File", default)]
    pub file: String,
    /// Detection start time in seconds.
    #[serde(rename = "Begin Time (s)", default)]
    pub begin_time: String,
    /// Detection end time in seconds.
    #[serde(rename = "End Time (s)", default)]
    pub end_time: String,
    /// Scientific name of the species.
    #[serde(rename = "Scientific Name", default)]
    pub scientific_name: String,
    /// Common name of the species.
    #[serde(rename = "Common Name", default)]
    pub common_name: String,
    /// Detection confidence (0.0 - 1.0).
    #[serde(rename = "Confidence", default)]
    pub confidence: String,
}

/// A detection in the unified table produced by the collector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionRecord {
    /// Name of the table the detection was read from.
    #[serde(rename = "File Name", alias = "File", default)]
    pub file_name: String,
    /// Detection start time in seconds.
    #[serde(rename = "Begin Time (s)", default)]
    pub begin_time: String,
    /// Detection end time in seconds.
    #[serde(rename = "End Time (s)", default)]
    pub end_time: String,
    /// Scientific name of the species.
    #[serde(rename = "Scientific Name", default)]
    pub scientific_name: String,
    /// Common name of the species.
    #[serde(rename = "Common Name", default)]
    pub common_name: String,
    /// Detection confidence as written by the classifier.
    #[serde(rename = "Confidence", default)]
    pub confidence: String,
}

impl DetectionRecord {
    /// Build a record from a classifier row read out of `file_name`.
    pub fn from_row(file_name: &str, row: ClassifierRow) -> Self {
        Self {
            file_name: file_name.to_string(),
            begin_time: row.begin_time,
            end_time: row.end_time,
            scientific_name: row.scientific_name,
            common_name: row.common_name,
            confidence: row.confidence,
        }
    }

    /// Parsed confidence, if present.
    pub fn confidence(&self) -> Option<f64> {
        parse_confidence(&self.confidence)
    }

    /// Parsed begin time, if present.
    pub fn begin_time(&self) -> Option<f64> {
        self.begin_time.trim().parse().ok()
    }
}

impl TableRow for DetectionRecord {
    const HEADER: &'static [&'static str] = &[
        "File Name",
        "Begin Time (s)",
        "End Time (s)",
        "Scientific Name",
        "Common Name",
        "Confidence",
    ];
}

/// A detection annotated with its validation label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LabelledDetection {
    /// Name of the table the detection was read from.
    #[serde(rename = "File Name")]
    pub file_name: String,
    /// Detection start time in seconds.
    #[serde(rename = "Begin Time (s)")]
    pub begin_time: String,
    /// Detection end time in seconds.
    #[serde(rename = "End Time (s)")]
    pub end_time: String,
    /// Scientific name of the species.
    #[serde(rename = "Scientific Name")]
    pub scientific_name: String,
    /// Common name of the species.
    #[serde(rename = "Common Name")]
    pub common_name: String,
    /// Detection confidence.
    #[serde(rename = "Confidence")]
    pub confidence: String,
    /// Annotator verdict.
    #[serde(rename = "TP.FP")]
    pub tp_fp: String,
    /// Species actually present.
    #[serde(rename = "True.Species")]
    pub true_species: String,
    /// Annotator notes.
    #[serde(rename = "Notes")]
    pub notes: String,
}

impl LabelledDetection {
    /// Attach a validation row to a detection.
    pub fn new(detection: DetectionRecord, validation: &ValidationRecord) -> Self {
        Self {
            file_name: detection.file_name,
            begin_time: detection.begin_time,
            end_time: detection.end_time,
            scientific_name: detection.scientific_name,
            common_name: detection.common_name,
            confidence: detection.confidence,
            tp_fp: validation.tp_fp.clone(),
            true_species: validation.true_species.clone(),
            notes: validation.notes.clone(),
        }
    }
}

impl TableRow for LabelledDetection {
    const HEADER: &'static [&'static str] = &[
        "File Name",
        "Begin Time (s)",
        "End Time (s)",
        "Scientific Name",
        "Common Name",
        "Confidence",
        "TP.FP",
        "True.Species",
        "Notes",
    ];
}

/// A hand-labeled validation row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ValidationRecord {
    /// Recording the label refers to; may be a prefix of the detection's name.
    #[serde(rename = "File", alias = "File Name", default)]
    pub file_name: String,
    /// Confidence recorded by the annotator.
    #[serde(rename = "Confidence", default)]
    pub confidence: String,
    /// True/false positive marker.
    #[serde(rename = "TP.FP", default)]
    pub tp_fp: String,
    /// Species actually present, `&`-separated when several.
    #[serde(rename = "True.Species", default)]
    pub true_species: String,
    /// Free-form annotator notes.
    #[serde(rename = "Notes", default)]
    pub notes: String,
}

/// A detection paired with a validation row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedRecord {
    /// Detection table name.
    #[serde(rename = "File Name", default)]
    pub file_name: String,
    /// Species predicted by the classifier.
    #[serde(rename = "Species", default)]
    pub predicted_species: String,
    /// Confidence from the validation table.
    #[serde(rename = "Validation Confidence", default)]
    pub validation_confidence: String,
    /// Confidence from the combined detection table.
    #[serde(rename = "Combined Confidence", default)]
    pub combined_confidence: String,
    /// Annotator verdict.
    #[serde(rename = "TP.FP", default)]
    pub tp_fp: String,
    /// Species actually present.
    #[serde(rename = "True Species", default)]
    pub true_species: String,
}

impl MergedRecord {
    /// Pair a detection with a validation row.
    pub fn new(detection: &DetectionRecord, validation: &ValidationRecord) -> Self {
        Self {
            file_name: detection.file_name.clone(),
            predicted_species: detection.common_name.clone(),
            validation_confidence: validation.confidence.clone(),
            combined_confidence: detection.confidence.clone(),
            tp_fp: validation.tp_fp.clone(),
            true_species: validation.true_species.clone(),
        }
    }

    /// Parsed annotator verdict.
    pub fn verdict(&self) -> Verdict {
        Verdict::parse(&self.tp_fp)
    }

    /// Parsed combined confidence, if present.
    pub fn combined_confidence(&self) -> Option<f64> {
        parse_confidence(&self.combined_confidence)
    }
}

impl TableRow for MergedRecord {
    const HEADER: &'static [&'static str] = &[
        "File Name",
        "Species",
        "Validation Confidence",
        "Combined Confidence",
        "TP.FP",
        "True Species",
    ];
}

/// Annotator verdict on a detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// The detection was correct.
    TruePositive,
    /// The detection was wrong.
    FalsePositive,
    /// No usable verdict.
    Undecided,
}

impl Verdict {
    /// Parse a `TP.FP` cell.
    ///
    /// Annotation sheets use `T`/`F` or `TRUE`/`FALSE` depending on the tool
    /// that exported them; both are accepted in any case.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "T" | "TRUE" | "1" => Self::TruePositive,
            "F" | "FALSE" | "0" => Self::FalsePositive,
            _ => Self::Undecided,
        }
    }

    /// Whether the annotator reached a decision.
    pub const fn is_decided(self) -> bool {
        !matches!(self, Self::Undecided)
    }

    /// Accuracy indicator used by the regressions.
    pub const fn accuracy(self) -> f64 {
        match self {
            Self::TruePositive => 1.0,
            Self::FalsePositive | Self::Undecided => 0.0,
        }
    }
}

/// Parse a confidence cell.
pub fn parse_confidence(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
