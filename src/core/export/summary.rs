//! Export summary and reporting
//!
//! This module defines structures for tracking and reporting export results.

use crate::domain::{EcfError, EcfTable};
use std::time::Duration;

/// Records written to one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSummary {
    pub table: EcfTable,
    pub records: usize,
}

/// Summary of an export run
#[derive(Debug, Clone, Default)]
pub struct ExportSummary {
    /// Completed tables in export order
    pub tables: Vec<TableSummary>,

    /// Number of completed tables
    pub total_tables: usize,

    /// Number of records written across completed tables
    pub total_records: usize,

    /// Duration of the export
    pub duration: Duration,
}

impl ExportSummary {
    /// Create a new empty export summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Count a completed table
    pub fn add_table(&mut self, table: EcfTable, records: usize) {
        self.tables.push(TableSummary { table, records });
        self.total_tables += 1;
        self.total_records += records;
    }

    /// Records written to a table, if it was exported
    pub fn records_for(&self, table: EcfTable) -> Option<usize> {
        self.tables
            .iter()
            .find(|t| t.table == table)
            .map(|t| t.records)
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            total_tables = self.total_tables,
            total_records = self.total_records,
            duration_ms = self.duration.as_millis() as u64,
            "Export completed"
        );

        for table in &self.tables {
            tracing::debug!(
                table = %table.table,
                records = table.records,
                "Table exported"
            );
        }
    }
}

/// A failed run together with the counts reached before the failure
#[derive(Debug, thiserror::Error)]
#[error("{error}")]
pub struct ExportFailure {
    /// Tables completed before the failure
    pub partial: ExportSummary,

    /// The error that aborted the run
    #[source]
    pub error: EcfError,
}

impl ExportFailure {
    pub fn new(partial: ExportSummary, error: EcfError) -> Self {
        Self { partial, error }
    }

    /// Whether the run was aborted by a shutdown signal
    pub fn is_cancelled(&self) -> bool {
        self.error.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_summary_creation() {
        let summary = ExportSummary::new();

        assert!(summary.tables.is_empty());
        assert_eq!(summary.total_tables, 0);
        assert_eq!(summary.total_records, 0);
        assert_eq!(summary.duration, Duration::from_secs(0));
    }

    #[test]
    fn test_export_summary_with_duration() {
        let summary = ExportSummary::new().with_duration(Duration::from_secs(120));

        assert_eq!(summary.duration, Duration::from_secs(120));
    }

    #[test]
    fn test_add_table_accumulates_totals() {
        let mut summary = ExportSummary::new();
        summary.add_table(EcfTable::Subjects, 12);
        summary.add_table(EcfTable::Students, 0);

        assert_eq!(summary.total_tables, 2);
        assert_eq!(summary.total_records, 12);
        assert_eq!(summary.records_for(EcfTable::Students), Some(0));
        assert_eq!(summary.records_for(EcfTable::Teachers), None);
    }

    #[test]
    fn test_export_failure_keeps_partial_counts() {
        let mut partial = ExportSummary::new();
        partial.add_table(EcfTable::Subjects, 3);

        let failure = ExportFailure::new(partial, EcfError::Cancelled("SIGINT".to_string()));

        assert!(failure.is_cancelled());
        assert_eq!(failure.partial.total_records, 3);
        assert_eq!(failure.to_string(), "Export cancelled: SIGINT");
    }
}
