//! CLI argument parsing and command handling.

mod args;
pub mod validators;

pub use args::{
    Cli, CollectArgs, Command, ConfigAction, FolderSummaryArgs, FrequencyArgs, GlobalArgs,
    ReconcileArgs, RegressionArgs, ScoreArgs, ThresholdsArgs, TimelineArgs,
};
