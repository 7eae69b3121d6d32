//! CSV output format writer.

use crate::constants::UTF8_BOM;
use crate::error::{Error, Result};
use crate::output::OutputWriter;
use crate::table::TableRow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Open a CSV writer, optionally prefixed with a UTF-8 BOM.
///
/// The header is not written automatically; callers emit it explicitly so
/// that an empty table still carries its column names.
pub fn create_csv(path: &Path, bom: bool) -> Result<csv::Writer<BufWriter<File>>> {
    let file = File::create(path)?;
    let mut buffered = BufWriter::new(file);
    if bom {
        buffered.write_all(UTF8_BOM)?;
    }
    Ok(csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(buffered))
}

/// CSV format output writer for a fixed row type.
pub struct CsvWriter<R> {
    writer: csv::Writer<BufWriter<File>>,
    path: PathBuf,
    _row: PhantomData<R>,
}

impl<R: TableRow> CsvWriter<R> {
    /// Create a new CSV writer.
    pub fn new(path: &Path, bom: bool) -> Result<Self> {
        Ok(Self {
            writer: create_csv(path, bom)?,
            path: path.to_path_buf(),
            _row: PhantomData,
        })
    }

    fn csv_error(&self, source: csv::Error) -> Error {
        Error::CsvWrite {
            path: self.path.clone(),
            source,
        }
    }
}

impl<R: TableRow> OutputWriter<R> for CsvWriter<R> {
    fn write_header(&mut self) -> Result<()> {
        self.writer
            .write_record(R::HEADER)
            .map_err(|e| self.csv_error(e))
    }

    fn write_row(&mut self, row: &R) -> Result<()> {
        self.writer.serialize(row).map_err(|e| self.csv_error(e))
    }

    fn finalize(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Write a complete table in one call.
pub fn write_table<R: TableRow>(path: &Path, rows: &[R], bom: bool) -> Result<()> {
    let mut writer = CsvWriter::<R>::new(path, bom)?;
    super::write_all(&mut writer, rows)
}
