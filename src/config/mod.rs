//! Configuration loading and management.

mod file;
mod paths;
mod types;
mod validate;

pub use file::{load_config_file, load_default_config, save_config};
pub use paths::{config_dir, config_file_path};
pub use types::{
    BandGroup, Config, FolderSummaryConfig, FrequencyBand, MatchingConfig, OutputFormat,
    PathsConfig, ScoringConfig, SynonymGroup, ThresholdConfig,
};
pub use validate::validate_config;
