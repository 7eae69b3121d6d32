//! JSON output format writer.
//!
//! Rows are buffered and written once, wrapped in an envelope that records
//! when and from which input the report was produced.

use crate::error::{Error, Result};
use crate::output::OutputWriter;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Version of the JSON envelope format.
pub const FORMAT_VERSION: &str = "1.0";

/// Kind of report carried by an envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    /// Per-species precision, recall and F1.
    Metrics,
    /// Per-species confidence thresholds.
    Thresholds,
}

/// JSON envelope wrapping a report.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonReport<T> {
    /// Envelope format version.
    pub format_version: String,
    /// Report timestamp.
    pub generated_at: DateTime<Utc>,
    /// Report kind.
    pub kind: ReportKind,
    /// Table the report was computed from.
    pub source: PathBuf,
    /// Report rows.
    pub rows: Vec<T>,
}

/// Writer for JSON report files.
pub struct JsonWriter<R> {
    rows: Vec<R>,
    kind: ReportKind,
    source: PathBuf,
    output_path: PathBuf,
}

impl<R: Serialize + Clone> JsonWriter<R> {
    /// Create a new JSON writer.
    pub fn new(output_path: &Path, kind: ReportKind, source: &Path) -> Self {
        Self {
            rows: Vec::new(),
            kind,
            source: source.to_path_buf(),
            output_path: output_path.to_path_buf(),
        }
    }
}

impl<R: Serialize + Clone> OutputWriter<R> for JsonWriter<R> {
    fn write_header(&mut self) -> Result<()> {
        Ok(())
    }

    fn write_row(&mut self, row: &R) -> Result<()> {
        self.rows.push(row.clone());
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        let report = JsonReport {
            format_version: FORMAT_VERSION.to_string(),
            generated_at: Utc::now(),
            kind: self.kind,
            source: self.source.clone(),
            rows: std::mem::take(&mut self.rows),
        };

        let file = File::create(&self.output_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &report).map_err(|e| Error::JsonWrite {
            path: self.output_path.clone(),
            source: e,
        })?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::output::write_all;
    use tempfile::NamedTempFile;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct Row {
        species: String,
        value: f64,
    }

    #[test]
    fn test_json_writer_envelope() {
        let file = NamedTempFile::new().unwrap();
        let mut writer = JsonWriter::new(file.path(), ReportKind::Metrics, Path::new("merged.csv"));
        let rows = vec![Row {
            species: "Magpie".to_string(),
            value: 0.5,
        }];
        write_all(&mut writer, &rows).unwrap();

        let contents = std::fs::read_to_string(file.path()).unwrap();
        let report: JsonReport<Row> = serde_json::from_str(&contents).unwrap();
        assert_eq!(report.format_version, FORMAT_VERSION);
        assert_eq!(report.kind, ReportKind::Metrics);
        assert_eq!(report.source, PathBuf::from("merged.csv"));
        assert_eq!(report.rows, rows);
    }

    #[test]
    fn test_report_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ReportKind::Thresholds).unwrap();
        assert_eq!(json, "\"thresholds\"");
    }
}
