//! edoo.sys database record source
//!
//! Streams query rows as typed records. The pooled connection travels with
//! the row stream and goes back to the pool when the stream is dropped.

use super::client::PostgreSQLClient;
use super::models::record_from_row;
use super::queries::query_for;
use crate::adapters::source::{RecordSource, RecordStream, SourceSelection};
use crate::config::SourceProvider;
use crate::domain::{EcfError, EcfTable, Result};
use async_trait::async_trait;
use futures::StreamExt;
use std::sync::Arc;
use tokio_postgres::types::ToSql;

/// Record source backed by the edoo.sys PostgreSQL database
pub struct EdoosysDbReader {
    client: Arc<PostgreSQLClient>,
}

impl EdoosysDbReader {
    pub fn new(client: PostgreSQLClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

/// School number and year code, both required for database queries
pub(crate) fn require_school(selection: &SourceSelection) -> Result<(String, String)> {
    match (&selection.school_no, &selection.school_year_code) {
        (Some(school_no), Some(school_year_code)) => {
            Ok((school_no.clone(), school_year_code.clone()))
        }
        _ => Err(EcfError::Configuration(
            "No school no and/or no school year for edoo.sys database defined".to_string(),
        )),
    }
}

#[async_trait]
impl RecordSource for EdoosysDbReader {
    fn provider(&self) -> SourceProvider {
        SourceProvider::Postgres
    }

    async fn records(&self, table: EcfTable, selection: &SourceSelection) -> Result<RecordStream> {
        let (school_no, school_year_code) = require_school(selection)?;
        let query = query_for(table);

        let mut params: Vec<Box<dyn ToSql + Sync + Send>> =
            vec![Box::new(school_no), Box::new(school_year_code)];
        if query.filters_active {
            params.push(Box::new(selection.active_only));
        }

        tracing::debug!(
            table = %table,
            active_only = selection.active_only,
            "Querying edoo.sys database"
        );

        let connection = self.client.get_connection().await?;
        let rows = connection
            .query_raw(query.sql, params)
            .await
            .map_err(|e| EcfError::Database(format!("Query for {} failed: {}", table, e)))?;

        let records = rows.map(move |row| {
            let _connection = &connection;
            let row = row.map_err(|e| {
                EcfError::Database(format!("Reading {} rows failed: {}", table, e))
            })?;
            record_from_row(table, &row)
        });

        Ok(records.boxed())
    }
}
