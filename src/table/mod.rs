//! CSV table rows and reading.
//!
//! Every stage exchanges data through CSV files. The row types here fix the
//! header names each stage reads and writes.

mod reader;
mod records;

pub use reader::read_table;
pub use records::{
    ClassifierRow, DetectionRecord, LabelledDetection, MergedRecord, TableRow, ValidationRecord,
    Verdict, parse_confidence,
};
