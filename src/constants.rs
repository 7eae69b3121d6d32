//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "birdval";

/// UTF-8 Byte Order Mark for Excel compatibility in CSV files.
pub const UTF8_BOM: &[u8; 3] = b"\xEF\xBB\xBF";

/// Default file locations, relative to the working directory.
pub mod paths {
    /// Hand-labeled validation table.
    pub const VALIDATION_FILE: &str = "BirdNet_validation.csv";
    /// Collector output.
    pub const COMBINED_FILE: &str = "combined_data.csv";
    /// Reconciler output.
    pub const MERGED_FILE: &str = "merged.csv";
    /// Directory for scorer and diagnostics output.
    pub const OUTPUT_DIR: &str = "confusion_matrices";
}

/// Output file names written into the output directory.
pub mod output_files {
    /// Confusion matrix counts.
    pub const MATRIX_CSV: &str = "confusion_matrix.csv";
    /// Confusion matrix heatmap.
    pub const MATRIX_SVG: &str = "confusion_matrix.svg";
    /// Per-species metrics (CSV).
    pub const METRICS_CSV: &str = "metrics.csv";
    /// Per-species metrics (JSON).
    pub const METRICS_JSON: &str = "metrics.json";
    /// Suffix inserted before the extension for the non-bird variant.
    pub const NON_BIRD_SUFFIX: &str = "_non_bird";
    /// Per-species confidence thresholds.
    pub const THRESHOLDS_CSV: &str = "validation_thresholds.csv";
    /// Accuracy vs confidence scatter plot.
    pub const VALIDATION_PLOT: &str = "validation_plot.svg";
    /// Per-species regression lines.
    pub const REGRESSION_CSV: &str = "accuracy_regression.csv";
    /// Per-species regression chart grid.
    pub const REGRESSION_SVG: &str = "accuracy_regression.svg";
    /// Detection timeline chart.
    pub const TIMELINE_SVG: &str = "timeline.svg";
    /// Frequency range chart.
    pub const FREQUENCY_SVG: &str = "frequency_ranges.svg";
    /// Species folder summary table.
    pub const FOLDER_SUMMARY_CSV: &str = "folder_summary.csv";
    /// Average highest confidence chart.
    pub const FOLDER_CONFIDENCE_SVG: &str = "folder_confidence.svg";
    /// Average other-species count chart.
    pub const FOLDER_OTHERS_SVG: &str = "folder_other_species.svg";
}

/// Collector constants.
pub mod collector {
    /// Suffix of the nested folder holding extra tables (`<name>_Validate`).
    pub const VALIDATE_SUFFIX: &str = "_Validate";
    /// Extension of detection tables.
    pub const CSV_EXTENSION: &str = "csv";
}

/// Scoring constants.
pub mod scoring {
    /// Separator between values of a multi-label truth field.
    pub const TRUTH_SEPARATOR: char = '&';
    /// Label that replaces all non-bird sounds in the coarse matrix.
    pub const NON_BIRD_LABEL: &str = "Non-bird";
    /// Default marker for rows whose truth is unknown.
    pub const UNKNOWN_TRUTH_MARKER: &str = "?";
    /// Default non-animal labels collapsed into the non-bird bucket.
    pub const DEFAULT_NON_BIRD_LABELS: &[&str] =
        &["Wind", "Insects", "Plane", "White noise", "Kangaroo jumping"];
}

/// Threshold search constants.
pub mod thresholds {
    /// Target predicted accuracy.
    pub const DEFAULT_ACCURACY_TARGET: f64 = 0.9;
    /// Confidence reported when a species cannot be fitted.
    pub const DEFAULT_FALLBACK_CONFIDENCE: f64 = 0.1;
}

/// Logistic regression solver constants.
pub mod logistic {
    /// Maximum Newton iterations.
    pub const MAX_ITERATIONS: usize = 100;
    /// Convergence tolerance on the coefficient step.
    pub const TOLERANCE: f64 = 1e-8;
    /// Hessian determinant below which the system is treated as singular.
    pub const SINGULAR_EPSILON: f64 = 1e-12;
    /// Coefficient magnitude treated as divergence (perfect separation).
    pub const DIVERGENCE_LIMIT: f64 = 1e3;
}

/// Folder summary constants.
pub mod folder_summary {
    /// Only confidences strictly above this floor are considered.
    pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.5;
}

/// Chart dimensions and styling.
pub mod plot {
    /// Font family for all chart text.
    pub const FONT: &str = "sans-serif";
    /// Base size of a heatmap cell in pixels.
    pub const HEATMAP_CELL: u32 = 48;
    /// Smallest heatmap canvas edge in pixels.
    pub const HEATMAP_MIN_EDGE: u32 = 600;
    /// Largest marker radius in the timeline chart.
    pub const TIMELINE_MAX_RADIUS: f64 = 14.0;
    /// Columns in the regression grid.
    pub const REGRESSION_COLUMNS: usize = 2;
    /// Height of one regression grid row in pixels.
    pub const REGRESSION_ROW_HEIGHT: u32 = 280;
}
