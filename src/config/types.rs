//! Configuration type definitions.

use crate::constants::{folder_summary, paths, scoring, thresholds};
use crate::reconciler::StemRule;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default file locations.
    pub paths: PathsConfig,

    /// Detection/validation matching settings.
    pub matching: MatchingConfig,

    /// Confusion matrix settings.
    pub scoring: ScoringConfig,

    /// Confidence threshold search settings.
    pub thresholds: ThresholdConfig,

    /// Species folder summary settings.
    pub folder_summary: FolderSummaryConfig,

    /// Species frequency bands for the frequency chart.
    pub frequency_bands: Vec<FrequencyBand>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paths: PathsConfig::default(),
            matching: MatchingConfig::default(),
            scoring: ScoringConfig::default(),
            thresholds: ThresholdConfig::default(),
            folder_summary: FolderSummaryConfig::default(),
            frequency_bands: default_frequency_bands(),
        }
    }
}

/// Default file locations, overridden by command-line paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Hand-labeled validation table.
    pub validation_file: PathBuf,
    /// Unified detection table written by `collect`.
    pub combined_file: PathBuf,
    /// Merged table written by `reconcile`.
    pub merged_file: PathBuf,
    /// Directory for reports and charts.
    pub output_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            validation_file: PathBuf::from(paths::VALIDATION_FILE),
            combined_file: PathBuf::from(paths::COMBINED_FILE),
            merged_file: PathBuf::from(paths::MERGED_FILE),
            output_dir: PathBuf::from(paths::OUTPUT_DIR),
        }
    }
}

/// Detection/validation matching settings.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// How file names are reduced to stems before prefix matching.
    pub stem_rule: StemRule,
}

/// Confusion matrix settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Split `&`-separated truth into one pair per species.
    pub expand_multi_label: bool,

    /// Also build the coarse matrix with non-bird sounds bucketed.
    pub bucket_non_bird: bool,

    /// Truth value marking rows whose species is unknown.
    pub unknown_truth_marker: String,

    /// Labels collapsed into the non-bird bucket.
    pub non_bird_labels: Vec<String>,

    /// Fixed label axis; empty means the observed labels.
    pub labels: Vec<String>,

    /// Synonym groups applied during species normalization.
    pub synonyms: Vec<SynonymGroup>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            expand_multi_label: true,
            bucket_non_bird: false,
            unknown_truth_marker: scoring::UNKNOWN_TRUTH_MARKER.to_string(),
            non_bird_labels: scoring::DEFAULT_NON_BIRD_LABELS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            labels: Vec::new(),
            synonyms: vec![
                SynonymGroup {
                    canonical: "Corvid".to_string(),
                    aliases: vec!["corvid".to_string()],
                },
                SynonymGroup {
                    canonical: "Pipit".to_string(),
                    aliases: vec!["pipit".to_string()],
                },
            ],
        }
    }
}

/// A canonical species name and the substrings that map onto it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynonymGroup {
    /// Name every alias normalizes to.
    pub canonical: String,
    /// Case-insensitive substrings identifying the group.
    pub aliases: Vec<String>,
}

/// Confidence threshold search settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    /// Predicted accuracy a threshold must reach.
    pub accuracy_target: f64,
    /// Confidence reported when the model cannot be fitted.
    pub fallback_confidence: f64,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            accuracy_target: thresholds::DEFAULT_ACCURACY_TARGET,
            fallback_confidence: thresholds::DEFAULT_FALLBACK_CONFIDENCE,
        }
    }
}

/// Species folder summary settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct FolderSummaryConfig {
    /// Only confidences strictly above this value are considered.
    pub min_confidence: f64,
}

impl Default for FolderSummaryConfig {
    fn default() -> Self {
        Self {
            min_confidence: folder_summary::DEFAULT_MIN_CONFIDENCE,
        }
    }
}

/// Vocal frequency band of a species.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyBand {
    /// Common name of the species.
    pub species: String,
    /// Lower bound in Hz.
    pub low_hz: u32,
    /// Upper bound in Hz.
    pub high_hz: u32,
    /// Band group.
    #[serde(default)]
    pub group: BandGroup,
}

/// Frequency band grouping; high bands are drawn first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BandGroup {
    /// High-pitched callers.
    High,
    /// Low-pitched callers.
    #[default]
    Low,
}

fn default_frequency_bands() -> Vec<FrequencyBand> {
    let band = |species: &str, low_hz, high_hz, group| FrequencyBand {
        species: species.to_string(),
        low_hz,
        high_hz,
        group,
    };
    vec![
        band("Superb Fairywren", 4000, 8000, BandGroup::High),
        band("Variegated Fairywren", 4000, 8000, BandGroup::High),
        band("Splendid Fairywren", 4000, 8000, BandGroup::High),
        band("White-winged Fairywren", 4000, 8000, BandGroup::High),
        band("Purple-backed Fairywren", 4000, 8000, BandGroup::High),
        band("Laughing Kookaburra", 300, 3000, BandGroup::Low),
        band("Brolga", 100, 2000, BandGroup::Low),
        band("Tawny Frogmouth", 100, 4000, BandGroup::Low),
    ]
}

/// Supported report formats.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Comma-separated table.
    #[default]
    Csv,
    /// JSON report with envelope.
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}
