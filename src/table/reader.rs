//! CSV table reading.

use std::path::Path;

use csv::StringRecord;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// Read every row of a CSV table.
///
/// Headers and fields are trimmed and a UTF-8 BOM is tolerated. Rows shorter
/// than the header are padded with empty cells and cells beyond the header
/// are ignored, so a ragged row still yields a record.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or a row cannot be decoded.
pub fn read_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let open_error = |e| Error::CsvOpen {
        path: path.to_path_buf(),
        source: e,
    };
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(open_error)?;
    let headers = reader.headers().map_err(open_error)?.clone();

    let mut rows = Vec::new();
    let mut record = StringRecord::new();
    let mut line = 1;
    loop {
        let more = reader.read_record(&mut record).map_err(|e| Error::InvalidRecord {
            path: path.to_path_buf(),
            line: line + 1,
            source: e,
        })?;
        if !more {
            break;
        }
        line = record
            .position()
            .and_then(|pos| usize::try_from(pos.line()).ok())
            .unwrap_or(line + 1);

        record.truncate(headers.len());
        while record.len() < headers.len() {
            record.push_field("");
        }

        let row: T = record
            .deserialize(Some(&headers))
            .map_err(|e| Error::InvalidRecord {
                path: path.to_path_buf(),
                line,
                source: e,
            })?;
        rows.push(row);
    }

    Ok(rows)
}
