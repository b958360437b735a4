//! ECF table writer
//!
//! Writes one `;`-separated ECF table: a header row, then one line per
//! [`EcfRow`] projected onto that header list.

use crate::domain::{EcfError, EcfRow, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Field delimiter of ECF files
pub const ECF_DELIMITER: u8 = b';';

/// Writer for one ECF table
pub struct EcfTableWriter<W: Write> {
    writer: csv::Writer<W>,
    headers: Vec<String>,
}

impl EcfTableWriter<BufWriter<File>> {
    /// Create (or truncate) the table file at `path`
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|e| {
            EcfError::Io(format!("Failed to create {}: {}", path.display(), e))
        })?;
        Ok(Self::from_writer(BufWriter::new(file)))
    }
}

impl<W: Write> EcfTableWriter<W> {
    pub fn from_writer(inner: W) -> Self {
        let writer = csv::WriterBuilder::new()
            .delimiter(ECF_DELIMITER)
            .has_headers(false)
            .from_writer(inner);
        Self {
            writer,
            headers: Vec::new(),
        }
    }

    /// Write the header row; fixes the column order for all following rows
    pub fn write_headers<S: AsRef<str>>(&mut self, headers: &[S]) -> Result<()> {
        self.headers = headers.iter().map(|h| h.as_ref().to_string()).collect();
        self.writer.write_record(&self.headers)?;
        Ok(())
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Write one row; fields outside the header list are dropped
    pub fn write_row(&mut self, row: &EcfRow) -> Result<()> {
        if self.headers.is_empty() {
            return Err(EcfError::Csv(
                "Headers must be written before the first row".to_string(),
            ));
        }
        self.writer.write_record(row.project(&self.headers))?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flush and return the underlying writer
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| EcfError::Io(format!("Failed to flush ECF table: {}", e.error())))
    }
}
