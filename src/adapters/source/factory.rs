//! Record source factory
//!
//! Creates the record source selected by `ecf_export.source_provider`.

use super::traits::RecordSource;
use crate::adapters::csv::EdoosysCsvReader;
use crate::adapters::postgresql::{EdoosysDbReader, PostgreSQLClient};
use crate::config::{EcfExportConfig, SourceProvider};
use crate::domain::{EcfError, Result};
use std::sync::Arc;

/// Create a record source based on the configuration
///
/// # Errors
///
/// Returns an error if the provider's settings are missing or the database
/// pool cannot be created.
pub async fn create_record_source(config: &EcfExportConfig) -> Result<Arc<dyn RecordSource>> {
    match config.source_provider {
        SourceProvider::Csv => {
            let path = config.source_file_name.as_deref().ok_or_else(|| {
                EcfError::Configuration(
                    "ecf_export.source_file_name is required for the csv provider".to_string(),
                )
            })?;
            let delimiter = config.separator_byte().map_err(EcfError::Configuration)?;

            tracing::info!(source_file = %path, "Creating edoo.sys flat file source");
            Ok(Arc::new(EdoosysCsvReader::new(path, delimiter)) as Arc<dyn RecordSource>)
        }
        SourceProvider::Postgres => {
            let connection = config.database_connection.as_ref().ok_or_else(|| {
                EcfError::Configuration(
                    "ecf_export.database_connection is required for the postgres provider"
                        .to_string(),
                )
            })?;

            tracing::info!("Creating edoo.sys database source");
            let client = PostgreSQLClient::new(connection).await?;
            tracing::debug!(
                connection = %client.connection_string_safe(),
                "edoo.sys connection pool created"
            );
            Ok(Arc::new(EdoosysDbReader::new(client)) as Arc<dyn RecordSource>)
        }
    }
}
