//! Score command execution.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::cli::ScoreArgs;
use crate::config::{Config, OutputFormat};
use crate::constants::output_files::{
    MATRIX_CSV, MATRIX_SVG, METRICS_CSV, METRICS_JSON, NON_BIRD_SUFFIX,
};
use crate::error::{Error, Result};
use crate::output::{OutputOptions, ReportKind, create_csv, ensure_dir, report_path, write_report};
use crate::plot::render_heatmap;
use crate::table::{MergedRecord, read_table};

use super::{ConfusionMatrix, Scorecard, ScoringOptions, SynonymTable, score};

/// Execute the score command.
///
/// # Errors
///
/// Returns an error if the merged table cannot be read, nothing is left to
/// score, a configured label set is incomplete, or an output cannot be
/// written.
pub fn execute(args: &ScoreArgs, config: &Config, options: OutputOptions) -> Result<()> {
    let merged = args
        .merged
        .clone()
        .unwrap_or_else(|| config.paths.merged_file.clone());
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config.paths.output_dir.clone());

    let synonyms = SynonymTable::new(&config.scoring.synonyms);
    let mut scoring = ScoringOptions::from_config(&config.scoring, &synonyms);
    scoring.bucket_non_bird |= args.non_bird;
    scoring.expand_multi_label &= !args.no_expand;

    let records: Vec<MergedRecord> = read_table(&merged)?;
    let report = score(&records, &synonyms, &scoring)?;
    if report.pairs == 0 {
        return Err(Error::NothingToScore { path: merged });
    }
    info!(
        "Scored {} label pairs from {} merged rows",
        report.pairs,
        records.len()
    );

    ensure_dir(&output_dir)?;
    let scope = ReportScope {
        output_dir: &output_dir,
        source: &merged,
        format: args.format,
        options,
    };

    scope.write(&report.species, "", "Confusion Matrix")?;
    if let Some(non_bird) = &report.non_bird {
        scope.write(non_bird, NON_BIRD_SUFFIX, "Confusion Matrix (Non-bird Bucketed)")?;
    }

    info!("Reports saved in {}", output_dir.display());
    Ok(())
}

struct ReportScope<'a> {
    output_dir: &'a Path,
    source: &'a Path,
    format: OutputFormat,
    options: OutputOptions,
}

impl ReportScope<'_> {
    /// Write matrix, metrics and heatmap of one variant.
    fn write(&self, card: &Scorecard, suffix: &str, title: &str) -> Result<()> {
        log_metrics(card);

        let matrix_path = report_path(self.output_dir, MATRIX_CSV, suffix);
        write_matrix(&card.matrix, &matrix_path, self.options.csv_bom)?;

        let metrics_path = write_report(
            &card.metrics,
            self.format,
            &report_path(self.output_dir, METRICS_CSV, suffix),
            &report_path(self.output_dir, METRICS_JSON, suffix),
            ReportKind::Metrics,
            self.source,
            self.options,
        )?;

        let heatmap_path = report_path(self.output_dir, MATRIX_SVG, suffix);
        render_heatmap(&card.matrix, title, &heatmap_path)?;

        info!(
            "Wrote {}, {} and {}",
            matrix_path.display(),
            metrics_path.display(),
            heatmap_path.display()
        );
        Ok(())
    }
}

fn log_metrics(card: &Scorecard) {
    info!("Metrics:");
    for m in &card.metrics {
        info!(
            "{}: Precision={:.2}, Recall={:.2}, F1-score={:.2}",
            m.species, m.precision, m.recall, m.f1
        );
    }
}

/// Write matrix counts with the label axis as header and first column.
pub fn write_matrix(matrix: &ConfusionMatrix, path: &Path, bom: bool) -> Result<PathBuf> {
    let csv_error = |source| Error::CsvWrite {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = create_csv(path, bom)?;

    let mut header = vec!["True Species".to_string()];
    header.extend(matrix.labels().iter().cloned());
    writer.write_record(&header).map_err(csv_error)?;

    for (label, row) in matrix.labels().iter().zip(matrix.rows()) {
        let mut record = vec![label.clone()];
        record.extend(row.iter().map(u64::to_string));
        writer.write_record(&record).map_err(csv_error)?;
    }

    writer.flush()?;
    Ok(path.to_path_buf())
}
