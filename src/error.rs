//! Error types for birdval.

use std::path::PathBuf;

/// Result type alias for birdval operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for birdval.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// Input directory does not exist.
    #[error("directory does not exist: {path}")]
    DirectoryNotFound {
        /// Path to the missing directory.
        path: PathBuf,
    },

    /// Failed to open a CSV table.
    #[error("failed to open CSV file '{path}'")]
    CsvOpen {
        /// Path to the CSV file.
        path: PathBuf,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// A CSV row could not be decoded.
    #[error("invalid record in '{path}' at line {line}")]
    InvalidRecord {
        /// Path to the CSV file.
        path: PathBuf,
        /// One-based line number (header is line 1).
        line: usize,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// Failed to write a CSV table.
    #[error("failed to write CSV file '{path}'")]
    CsvWrite {
        /// Path to the CSV file.
        path: PathBuf,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// Failed to write JSON output file.
    #[error("failed to write JSON output file '{path}'")]
    JsonWrite {
        /// Path to the JSON file.
        path: PathBuf,
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },

    /// Failed to create output directory.
    #[error("failed to create output directory '{path}'")]
    OutputDirCreateFailed {
        /// Path to the output directory.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A species occurs in the data but not in the configured label set.
    #[error("confusion matrix label set is missing species '{species}'")]
    LabelMissing {
        /// The species that has no axis position.
        species: String,
    },

    /// No decided rows were left to score.
    #[error("no scorable rows in '{path}' (every row is undecided or has no species)")]
    NothingToScore {
        /// Path to the merged table.
        path: PathBuf,
    },

    /// Chart rendering failed.
    #[error("failed to render chart '{path}': {reason}")]
    Plot {
        /// Path to the chart file.
        path: PathBuf,
        /// Description of the rendering failure.
        reason: String,
    },
}
