//! Entity mappers
//!
//! A mapper turns one source record into zero or more ECF rows for a single
//! table. There is one mapper per table and source kind; each owns its own
//! deduplication cache, while cross-table filters are read from and written
//! to the run's [`ExportContext`].

pub mod database;
pub mod flat;

use crate::config::SourceProvider;
use crate::core::export::collapse::ClassGroupPolicy;
use crate::core::export::context::ExportContext;
use crate::domain::{EcfError, EcfRow, EcfTable, Result, SourceRecord};

/// Converts source records of one table into ECF rows
pub trait EntityMapper: Send {
    /// The table this mapper writes
    fn table(&self) -> EcfTable;

    /// Headers written when the caller supplies none
    fn default_headers(&self) -> &'static [&'static str];

    /// Map one record
    ///
    /// # Errors
    ///
    /// Returns [`EcfError::Source`] if the record is of the wrong kind for
    /// this mapper.
    fn map(&mut self, record: SourceRecord, context: &mut ExportContext) -> Result<Vec<EcfRow>>;
}

/// Create the mapper for a table and source kind
pub fn create_mapper(
    provider: SourceProvider,
    table: EcfTable,
    policy: ClassGroupPolicy,
) -> Box<dyn EntityMapper> {
    match provider {
        SourceProvider::Csv => match table {
            EcfTable::Teachers => Box::new(flat::FlatTeacherMapper::default()),
            EcfTable::Subjects => Box::new(flat::FlatSubjectMapper::default()),
            EcfTable::SchoolClasses => Box::new(flat::FlatSchoolClassMapper::default()),
            EcfTable::Students => Box::new(flat::FlatStudentMapper::default()),
            EcfTable::StudentSchoolClassAttendances => {
                Box::new(flat::FlatAttendanceMapper::default())
            }
            EcfTable::StudentSubjects => Box::new(flat::FlatStudentSubjectMapper::default()),
        },
        SourceProvider::Postgres => match table {
            EcfTable::Teachers => Box::new(database::DbTeacherMapper::default()),
            EcfTable::Subjects => Box::new(database::DbSubjectMapper::default()),
            EcfTable::SchoolClasses => Box::new(database::DbSchoolClassMapper::new(policy)),
            EcfTable::Students => Box::new(database::DbStudentMapper::default()),
            EcfTable::StudentSchoolClassAttendances => {
                Box::new(database::DbAttendanceMapper::new(policy))
            }
            EcfTable::StudentSubjects => Box::new(database::DbStudentSubjectMapper::new(policy)),
        },
    }
}

pub(crate) fn unexpected_record(table: EcfTable, record: &SourceRecord) -> EcfError {
    EcfError::Source(format!(
        "Unexpected {} record for table {}",
        record.kind(),
        table
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_mapper_covers_every_table() {
        for provider in [SourceProvider::Csv, SourceProvider::Postgres] {
            for table in EcfTable::ALL {
                let mapper = create_mapper(provider, table, ClassGroupPolicy::CollapseToRoot);
                assert_eq!(mapper.table(), table);
                assert!(!mapper.default_headers().is_empty());
            }
        }
    }

    #[test]
    fn test_default_headers_differ_by_source() {
        let policy = ClassGroupPolicy::CollapseToRoot;
        let flat = create_mapper(SourceProvider::Csv, EcfTable::Teachers, policy);
        let db = create_mapper(SourceProvider::Postgres, EcfTable::Teachers, policy);

        assert_eq!(flat.default_headers(), &["Id", "Code"]);
        assert_eq!(
            db.default_headers(),
            &["Id", "Code", "LastName", "FirstName", "Gender", "Birthdate"]
        );
    }
}
