//! Report writers and progress reporting.

mod csv;
mod json;
pub mod progress;
mod writer;

pub use csv::{CsvWriter, create_csv, write_table};
pub use json::{JsonReport, JsonWriter, ReportKind, FORMAT_VERSION};
pub use writer::{OutputWriter, write_all};

use crate::config::OutputFormat;
use crate::error::{Error, Result};
use crate::table::TableRow;
use std::path::{Path, PathBuf};

/// Options shared by every command that writes files.
#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    /// Prefix CSV files with a UTF-8 BOM.
    pub csv_bom: bool,
    /// Show progress bars.
    pub progress: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            csv_bom: true,
            progress: false,
        }
    }
}

/// Create the output directory if it does not exist.
pub fn ensure_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|e| Error::OutputDirCreateFailed {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Path of a report inside `dir`, with an optional suffix before the extension.
///
/// `report_path("out", "metrics.csv", "_non_bird")` is `out/metrics_non_bird.csv`.
pub fn report_path(dir: &Path, file_name: &str, suffix: &str) -> PathBuf {
    if suffix.is_empty() {
        return dir.join(file_name);
    }
    match file_name.rsplit_once('.') {
        Some((stem, ext)) => dir.join(format!("{stem}{suffix}.{ext}")),
        None => dir.join(format!("{file_name}{suffix}")),
    }
}

/// Write report rows in the requested format.
///
/// The CSV path is used for [`OutputFormat::Csv`] and the JSON path for
/// [`OutputFormat::Json`]. Returns the path written.
pub fn write_report<R: TableRow + Clone + 'static>(
    rows: &[R],
    format: OutputFormat,
    csv_path: &Path,
    json_path: &Path,
    kind: ReportKind,
    source: &Path,
    options: OutputOptions,
) -> Result<PathBuf> {
    let (path, mut writer): (PathBuf, Box<dyn OutputWriter<R>>) = match format {
        OutputFormat::Csv => (
            csv_path.to_path_buf(),
            Box::new(CsvWriter::<R>::new(csv_path, options.csv_bom)?),
        ),
        OutputFormat::Json => (
            json_path.to_path_buf(),
            Box::new(JsonWriter::<R>::new(json_path, kind, source)),
        ),
    };
    write_all(writer.as_mut(), rows)?;
    Ok(path)
}
