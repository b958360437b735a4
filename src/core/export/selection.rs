//! Table selection and header overrides
//!
//! An empty `files` list exports every table with its default headers. A
//! non-empty list exports only the named tables; a non-empty `headers`
//! entry replaces the mapper's defaults for that table.

use crate::config::EcfFileConfig;
use crate::domain::{EcfError, EcfTable, Result};
use std::collections::HashMap;
use std::str::FromStr;

/// What to do for one enabled table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TablePlan {
    pub table: EcfTable,
    /// Caller headers; `None` means the mapper's defaults
    pub headers: Option<Vec<String>>,
}

/// Resolved table selection for one run
#[derive(Debug, Clone, Default)]
pub struct TableSelection {
    files: Option<HashMap<EcfTable, Vec<String>>>,
}

impl TableSelection {
    /// Every table, default headers
    pub fn all() -> Self {
        Self { files: None }
    }

    /// Selection from the `ecf_export.files` setting
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an unknown table name
    pub fn from_files(files: &[EcfFileConfig]) -> Result<Self> {
        if files.is_empty() {
            return Ok(Self::all());
        }

        let mut selected = HashMap::new();
        for file in files {
            let table = EcfTable::from_str(&file.name).map_err(EcfError::Configuration)?;
            selected.entry(table).or_insert_with(|| file.headers.clone());
        }
        Ok(Self {
            files: Some(selected),
        })
    }

    pub fn is_enabled(&self, table: EcfTable) -> bool {
        self.files
            .as_ref()
            .map_or(true, |files| files.contains_key(&table))
    }

    /// Plan for a table, or `None` if it is not selected
    pub fn resolve(&self, table: EcfTable) -> Option<TablePlan> {
        match &self.files {
            None => Some(TablePlan {
                table,
                headers: None,
            }),
            Some(files) => files.get(&table).map(|headers| TablePlan {
                table,
                headers: (!headers.is_empty()).then(|| headers.clone()),
            }),
        }
    }
}
