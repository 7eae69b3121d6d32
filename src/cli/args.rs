//! CLI argument definitions.

use crate::cli::validators::parse_ratio;
use crate::collector::CollectMode;
use crate::config::OutputFormat;
use crate::reconciler::StemRule;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Validate bird-call detections against hand-labeled data.
#[derive(Debug, Parser)]
#[command(name = "birdval")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Options shared by every subcommand.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log warnings and errors; hide progress bars.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Hide progress bars.
    #[arg(long, global = true)]
    pub no_progress: bool,

    /// Write CSV files without a UTF-8 byte order mark.
    #[arg(long, global = true)]
    pub no_csv_bom: bool,

    /// Configuration file (default: platform config directory).
    #[arg(long, global = true, env = "BIRDVAL_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Combine per-recording detection tables into one sorted table.
    Collect(CollectArgs),
    /// Join detections to validation rows by file-stem prefix.
    Reconcile(ReconcileArgs),
    /// Build the confusion matrix and per-species metrics.
    Score(ScoreArgs),
    /// Find per-species confidence thresholds by logistic regression.
    Thresholds(ThresholdsArgs),
    /// Fit per-species accuracy vs confidence lines.
    Regression(RegressionArgs),
    /// Chart detections of one recording over time.
    Timeline(TimelineArgs),
    /// Chart configured species frequency ranges.
    Frequency(FrequencyArgs),
    /// Summarize per-species folders of detection tables.
    FolderSummary(FolderSummaryArgs),
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Arguments for the collect subcommand.
#[derive(Debug, Args)]
pub struct CollectArgs {
    /// Root directory holding one subdirectory per site or species.
    pub root: PathBuf,

    /// Validation table listing already-validated files.
    #[arg(long)]
    pub validation: Option<PathBuf>,

    /// Output table.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Which tables to read.
    #[arg(long, value_enum, default_value_t = CollectMode::Unlabelled)]
    pub mode: CollectMode,
}

/// Arguments for the reconcile subcommand.
#[derive(Debug, Args)]
pub struct ReconcileArgs {
    /// Combined detection table.
    #[arg(long)]
    pub combined: Option<PathBuf>,

    /// Validation table.
    #[arg(long)]
    pub validation: Option<PathBuf>,

    /// Output table.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// How file names are reduced to stems before matching.
    #[arg(long, value_enum)]
    pub stem_rule: Option<StemRule>,
}

/// Arguments for the score subcommand.
#[derive(Debug, Args)]
pub struct ScoreArgs {
    /// Merged table.
    #[arg(long)]
    pub merged: Option<PathBuf>,

    /// Directory for the matrix, metrics and heatmap.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Also build the matrix with non-bird sounds bucketed together.
    #[arg(long)]
    pub non_bird: bool,

    /// Treat `&`-separated truth as a single label.
    #[arg(long)]
    pub no_expand: bool,

    /// Metrics report format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,
}

/// Arguments for the thresholds subcommand.
#[derive(Debug, Args)]
pub struct ThresholdsArgs {
    /// Merged table.
    #[arg(long)]
    pub merged: Option<PathBuf>,

    /// Directory for the thresholds table and plot.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Predicted accuracy a threshold must reach (0.0-1.0).
    #[arg(long, value_parser = parse_ratio)]
    pub target: Option<f64>,

    /// Thresholds report format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,
}

/// Arguments for the regression subcommand.
#[derive(Debug, Args)]
pub struct RegressionArgs {
    /// Merged table.
    #[arg(long)]
    pub merged: Option<PathBuf>,

    /// Directory for the regression table and chart.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}

/// Arguments for the timeline subcommand.
#[derive(Debug, Args)]
pub struct TimelineArgs {
    /// Detection table of one recording.
    pub detections: PathBuf,

    /// Output chart.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the frequency subcommand.
#[derive(Debug, Args)]
pub struct FrequencyArgs {
    /// Output chart.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the folder-summary subcommand.
#[derive(Debug, Args)]
pub struct FolderSummaryArgs {
    /// Root directory holding `<Scientific>_<Common>` folders.
    pub root: PathBuf,

    /// Directory for the summary table and charts.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Only confidences strictly above this value are considered (0.0-1.0).
    #[arg(long, value_parser = parse_ratio)]
    pub min_confidence: Option<f64>,
}
