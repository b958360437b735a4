//! Export command implementation
//!
//! This module implements the `export` command, which writes the ECF files
//! for one school from the configured edoo.sys source.

use crate::config::{load_config, EcfExportConfig, EcfFileConfig, SourceProvider};
use crate::core::export::ExportCoordinator;
use crate::domain::{EcfError, EcfTable};
use clap::Args;
use tokio::sync::watch;

/// Arguments for the export command
#[derive(Args, Debug, Default)]
pub struct ExportArgs {
    /// Override the edoo.sys source (csv or postgres)
    #[arg(long)]
    pub provider: Option<String>,

    /// Override the edoo.sys flat export file
    #[arg(long)]
    pub source_file: Option<String>,

    /// Override the target folder for ECF files
    #[arg(long)]
    pub target_folder: Option<String>,

    /// Override the school number
    #[arg(long)]
    pub school_no: Option<String>,

    /// Override the school year code, e.g. 2021/22
    #[arg(long)]
    pub school_year: Option<String>,

    /// Export class groups instead of collapsing them into their class
    #[arg(long)]
    pub keep_class_groups: bool,

    /// Restrict the run to these ECF tables (comma-separated)
    #[arg(long)]
    pub tables: Option<String>,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let mut config = match load_config(config_path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        if let Err(e) = self.apply_overrides(&mut config.ecf_export) {
            tracing::error!(error = %e, "Invalid command line override");
            eprintln!("{e}");
            return Ok(2);
        }

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        let coordinator = match ExportCoordinator::new(&config.ecf_export, shutdown_signal).await
        {
            Ok(coordinator) => coordinator,
            Err(e) => {
                tracing::error!(error = %e, "Failed to create export coordinator");
                eprintln!("Failed to initialize export: {e}");
                return Ok(if e.is_configuration() { 2 } else { 4 });
            }
        };

        match coordinator.execute_export().await {
            Ok(summary) => {
                tracing::info!(
                    tables = summary.total_tables,
                    records = summary.total_records,
                    "Export command finished"
                );
                Ok(0)
            }
            Err(failure) => {
                eprintln!("Export failed: {}", failure.error);
                Ok(exit_code_for(&failure.error))
            }
        }
    }

    /// Apply command line overrides to the export settings
    pub fn apply_overrides(&self, settings: &mut EcfExportConfig) -> Result<(), String> {
        if let Some(provider) = &self.provider {
            let provider: SourceProvider = provider.parse()?;
            tracing::info!(provider = %provider, "Overriding source provider from CLI");
            settings.source_provider = provider;
        }

        if let Some(source_file) = &self.source_file {
            tracing::info!(source_file = %source_file, "Overriding source file from CLI");
            settings.source_file_name = Some(source_file.clone());
        }

        if let Some(target_folder) = &self.target_folder {
            tracing::info!(target_folder = %target_folder, "Overriding target folder from CLI");
            settings.target_folder_name = target_folder.clone();
        }

        if let Some(school_no) = &self.school_no {
            tracing::info!(school_no = %school_no, "Overriding school no from CLI");
            settings.school_no = Some(school_no.clone());
        }

        if let Some(school_year) = &self.school_year {
            tracing::info!(school_year = %school_year, "Overriding school year from CLI");
            settings.school_year_code = Some(school_year.clone());
        }

        if self.keep_class_groups {
            tracing::info!("Keeping class groups from CLI");
            settings.no_school_class_groups = false;
        }

        if let Some(tables) = &self.tables {
            let tables = parse_tables(tables)?;
            tracing::info!(tables = ?tables, "Restricting tables from CLI");
            restrict_files(&mut settings.files, &tables);
        }

        Ok(())
    }
}

fn parse_tables(list: &str) -> Result<Vec<EcfTable>, String> {
    list.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::parse)
        .collect()
}

/// Keep only the listed tables
///
/// Configured header overrides survive for tables that stay. An empty file
/// list means every table, so it is replaced by the listed ones.
fn restrict_files(files: &mut Vec<EcfFileConfig>, tables: &[EcfTable]) {
    if files.is_empty() {
        *files = tables
            .iter()
            .map(|table| EcfFileConfig {
                name: table.name().to_string(),
                headers: vec![],
            })
            .collect();
    } else {
        files.retain(|file| {
            file.name
                .parse::<EcfTable>()
                .map(|table| tables.contains(&table))
                .unwrap_or(false)
        });
    }
}

/// Map an export error to the process exit code
pub fn exit_code_for(error: &EcfError) -> i32 {
    match error {
        EcfError::Cancelled(_) => 130,
        e if e.is_configuration() => 2,
        EcfError::Source(_) | EcfError::Database(_) => 4,
        _ => 5,
    }
}
