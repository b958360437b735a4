//! Record source abstraction
//!
//! Both edoo.sys representations (flat export file and database) implement
//! [`RecordSource`], so the export pipeline never knows which one it reads.

use crate::config::SourceProvider;
use crate::domain::{EcfTable, Result, SourceRecord};
use async_trait::async_trait;
use futures::stream::BoxStream;

/// Lazy, single-pass stream of source records
pub type RecordStream = BoxStream<'static, Result<SourceRecord>>;

/// Filter applied when reading one table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceSelection {
    /// School number (database only)
    pub school_no: Option<String>,

    /// School year code such as "2021/22" (database only)
    pub school_year_code: Option<String>,

    /// Restrict to currently active students
    pub active_only: bool,
}

impl SourceSelection {
    /// Selection for one table; student-related tables read active rows only
    pub fn for_table(
        table: EcfTable,
        school_no: Option<String>,
        school_year_code: Option<String>,
    ) -> Self {
        let active_only = matches!(
            table,
            EcfTable::Students
                | EcfTable::StudentSchoolClassAttendances
                | EcfTable::StudentSubjects
        );
        Self {
            school_no,
            school_year_code,
            active_only,
        }
    }
}

/// A source of edoo.sys records
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// The source kind, which decides the mapper family and schedule
    fn provider(&self) -> SourceProvider;

    /// Open a stream over the records feeding `table`
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be opened or the selection is
    /// incomplete for this source.
    async fn records(&self, table: EcfTable, selection: &SourceSelection) -> Result<RecordStream>;
}
