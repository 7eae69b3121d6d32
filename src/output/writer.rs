//! Output writer trait definition.

use crate::error::Result;

/// Trait for writing report rows.
pub trait OutputWriter<R> {
    /// Write the file header (if applicable).
    fn write_header(&mut self) -> Result<()>;

    /// Write a single row.
    fn write_row(&mut self, row: &R) -> Result<()>;

    /// Finalize the output (flush, close, etc.).
    fn finalize(&mut self) -> Result<()>;
}

/// Write a header, every row, and finalize.
pub fn write_all<R, W: OutputWriter<R> + ?Sized>(writer: &mut W, rows: &[R]) -> Result<()> {
    writer.write_header()?;
    for row in rows {
        writer.write_row(row)?;
    }
    writer.finalize()
}
