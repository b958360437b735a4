//! edoo.sys flat export reader
//!
//! The flat export is one wide, delimited file with a header row. Every
//! table is derived from the same lines, so the file is reopened and
//! streamed from the top for each table.

use crate::adapters::source::{RecordSource, RecordStream, SourceSelection};
use crate::config::SourceProvider;
use crate::domain::{EcfError, EcfTable, FlatRecord, HeaderIndex, Result, SourceRecord};
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Reader for the edoo.sys flat export file
#[derive(Debug, Clone)]
pub struct EdoosysCsvReader {
    path: PathBuf,
    delimiter: u8,
}

impl EdoosysCsvReader {
    pub fn new(path: impl AsRef<Path>, delimiter: u8) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            delimiter,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Result<csv::Reader<std::fs::File>> {
        csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)
            .map_err(|e| {
                EcfError::Source(format!(
                    "Failed to open edoo.sys file {}: {}",
                    self.path.display(),
                    e
                ))
            })
    }
}

#[async_trait]
impl RecordSource for EdoosysCsvReader {
    fn provider(&self) -> SourceProvider {
        SourceProvider::Csv
    }

    async fn records(&self, table: EcfTable, _selection: &SourceSelection) -> Result<RecordStream> {
        let mut reader = self.open()?;
        let index = Arc::new(HeaderIndex::new(reader.headers()?.iter()));

        tracing::debug!(
            table = %table,
            path = %self.path.display(),
            columns = index.len(),
            "Streaming edoo.sys flat file"
        );

        let records = reader.into_records().map(move |row| -> Result<SourceRecord> {
            let row = row?;
            Ok(SourceRecord::Flat(FlatRecord::new(
                Arc::clone(&index),
                row.iter().map(str::to_string).collect(),
            )))
        });

        Ok(stream::iter(records).boxed())
    }
}
