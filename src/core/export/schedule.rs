//! Ordered table schedules
//!
//! The database source needs existence filters filled before the tables
//! that consult them, so its schedule carries explicit dependencies which
//! are checked when the schedule is built.

use crate::config::SourceProvider;
use crate::domain::{EcfError, EcfTable, Result};

/// `dependent` may only be exported after `provider`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableDependency {
    pub dependent: EcfTable,
    pub provider: EcfTable,
}

/// Validated export order for one source kind
#[derive(Debug, Clone)]
pub struct ExportSchedule {
    steps: Vec<EcfTable>,
    dependencies: Vec<TableDependency>,
}

impl ExportSchedule {
    /// Build and validate a schedule
    ///
    /// # Errors
    ///
    /// Returns [`EcfError::Schedule`] if a table appears twice, a dependency
    /// names a table that is not scheduled, or a dependent precedes its
    /// provider.
    pub fn new(steps: Vec<EcfTable>, dependencies: Vec<TableDependency>) -> Result<Self> {
        for (index, table) in steps.iter().enumerate() {
            if steps[..index].contains(table) {
                return Err(EcfError::Schedule(format!(
                    "Table {table} is scheduled more than once"
                )));
            }
        }

        let position = |table: EcfTable| steps.iter().position(|t| *t == table);

        for dependency in &dependencies {
            let (Some(dependent), Some(provider)) =
                (position(dependency.dependent), position(dependency.provider))
            else {
                return Err(EcfError::Schedule(format!(
                    "Dependency {} <- {} refers to an unscheduled table",
                    dependency.dependent, dependency.provider
                )));
            };
            if dependent < provider {
                return Err(EcfError::Schedule(format!(
                    "Table {} must be exported after {}",
                    dependency.dependent, dependency.provider
                )));
            }
        }

        Ok(Self {
            steps,
            dependencies,
        })
    }

    /// The fixed schedule of a source kind
    pub fn for_provider(provider: SourceProvider) -> Result<Self> {
        match provider {
            SourceProvider::Csv => Self::new(
                vec![
                    EcfTable::Teachers,
                    EcfTable::Subjects,
                    EcfTable::SchoolClasses,
                    EcfTable::Students,
                    EcfTable::StudentSchoolClassAttendances,
                    EcfTable::StudentSubjects,
                ],
                vec![],
            ),
            SourceProvider::Postgres => Self::new(
                vec![
                    EcfTable::Subjects,
                    EcfTable::Students,
                    EcfTable::StudentSchoolClassAttendances,
                    EcfTable::StudentSubjects,
                    EcfTable::SchoolClasses,
                    EcfTable::Teachers,
                ],
                vec![
                    TableDependency {
                        dependent: EcfTable::Teachers,
                        provider: EcfTable::StudentSubjects,
                    },
                    TableDependency {
                        dependent: EcfTable::SchoolClasses,
                        provider: EcfTable::StudentSchoolClassAttendances,
                    },
                ],
            ),
        }
    }

    pub fn steps(&self) -> &[EcfTable] {
        &self.steps
    }

    pub fn dependencies(&self) -> &[TableDependency] {
        &self.dependencies
    }

    /// Dependencies whose dependent table is enabled but whose provider is not
    pub fn starved_dependencies<F>(&self, is_enabled: F) -> Vec<TableDependency>
    where
        F: Fn(EcfTable) -> bool,
    {
        self.dependencies
            .iter()
            .filter(|d| is_enabled(d.dependent) && !is_enabled(d.provider))
            .copied()
            .collect()
    }
}
