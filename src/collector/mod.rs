//! Collection of per-recording detection tables into one sorted table.
//!
//! Tables whose file name already appears in the validation set are skipped
//! so recordings that were labeled by hand are not counted twice. The
//! `labelled` mode inverts this: only rows whose recording is validated are
//! kept and each carries its validation label.

pub mod command;
mod natural_sort;
mod scan;

pub use natural_sort::{detection_order, natural_cmp};
pub use scan::{TableFile, find_tables, subdirectories, tables_in};

use crate::error::Result;
use crate::output::progress;
use crate::table::{ClassifierRow, DetectionRecord, LabelledDetection, ValidationRecord, read_table};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

/// Which tables the collector reads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum CollectMode {
    /// Skip tables already present in the validation set.
    #[default]
    Unlabelled,
    /// Keep only validated rows and attach their labels.
    Labelled,
}

/// Validation rows keyed by file name; a later row replaces an earlier one.
#[derive(Debug, Clone, Default)]
pub struct ValidationIndex {
    rows: HashMap<String, ValidationRecord>,
}

impl ValidationIndex {
    /// Build an index from validation rows.
    pub fn from_records(records: Vec<ValidationRecord>) -> Self {
        let rows = records
            .into_iter()
            .map(|row| (row.file_name.clone(), row))
            .collect();
        Self { rows }
    }

    /// Load the validation table.
    ///
    /// A missing file yields an empty index.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!(
                "Validation file not found, nothing will be excluded: {}",
                path.display()
            );
            return Ok(Self::default());
        }
        Ok(Self::from_records(read_table(path)?))
    }

    /// Whether `file_name` has a validation row.
    pub fn contains(&self, file_name: &str) -> bool {
        self.rows.contains_key(file_name)
    }

    /// Validation row for `file_name`.
    pub fn get(&self, file_name: &str) -> Option<&ValidationRecord> {
        self.rows.get(file_name)
    }

    /// Number of distinct validated files.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Counts reported after a collection run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectSummary {
    /// Tables read.
    pub tables_read: usize,
    /// Tables skipped by the mode's filter.
    pub tables_skipped: usize,
    /// Rows read but left out by the mode's filter.
    pub rows_skipped: usize,
    /// Rows in the output.
    pub rows: usize,
}

/// Collect every table below `root` that is not in the validation index.
///
/// The result is sorted by common name, then by natural order of file name.
pub fn collect_unlabelled(
    root: &Path,
    validation: &ValidationIndex,
    show_progress: bool,
) -> Result<(Vec<DetectionRecord>, CollectSummary)> {
    let (mut records, mut summary) = read_tables(
        root,
        |table| !validation.contains(&table.file_name),
        |table, _| Some(table.file_name.clone()),
        show_progress,
    )?;
    sort_records(&mut records);
    summary.rows = records.len();
    Ok((records, summary))
}

/// Collect only validated rows and attach their labels.
///
/// A row is keyed by its own `File` cell, or by the table name when that cell
/// is empty, and kept only when the key has a validation row.
pub fn collect_labelled(
    root: &Path,
    validation: &ValidationIndex,
    show_progress: bool,
) -> Result<(Vec<LabelledDetection>, CollectSummary)> {
    let (records, mut summary) = read_tables(
        root,
        |_| true,
        |table, row| {
            let key = if row.file.is_empty() {
                &table.file_name
            } else {
                &row.file
            };
            validation.contains(key).then(|| key.clone())
        },
        show_progress,
    )?;

    let mut labelled: Vec<LabelledDetection> = records
        .into_iter()
        .filter_map(|record| {
            let row = validation.get(&record.file_name)?;
            Some(LabelledDetection::new(record, row))
        })
        .collect();
    labelled.sort_by(|a, b| {
        detection_order(&a.common_name, &a.file_name, &b.common_name, &b.file_name)
    });

    summary.rows = labelled.len();
    Ok((labelled, summary))
}

/// Sort records into collector output order.
pub fn sort_records(records: &mut [DetectionRecord]) {
    records.sort_by(|a, b| {
        detection_order(&a.common_name, &a.file_name, &b.common_name, &b.file_name)
    });
}

/// Read the tables `include` accepts. `source` names the recording a row
/// belongs to; rows it returns `None` for are skipped.
fn read_tables(
    root: &Path,
    include: impl Fn(&TableFile) -> bool,
    source: impl Fn(&TableFile, &ClassifierRow) -> Option<String>,
    show_progress: bool,
) -> Result<(Vec<DetectionRecord>, CollectSummary)> {
    let tables = find_tables(root)?;
    let file_progress = progress::create_file_progress(tables.len(), show_progress);

    let mut summary = CollectSummary::default();
    let mut records = Vec::new();

    for table in &tables {
        if include(table) {
            let rows: Vec<ClassifierRow> = read_table(&table.path)?;
            debug!("Read {} rows from {}", rows.len(), table.path.display());
            for row in rows {
                match source(table, &row) {
                    Some(name) => records.push(DetectionRecord::from_row(&name, row)),
                    None => summary.rows_skipped += 1,
                }
            }
            summary.tables_read += 1;
        } else {
            debug!("Skipping {}", table.path.display());
            summary.tables_skipped += 1;
        }
        progress::inc_progress(file_progress.as_ref());
    }

    progress::finish_progress(file_progress, "Complete");
    Ok((records, summary))
}
