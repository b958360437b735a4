//! Export coordinator - main orchestrator for the export process
//!
//! This module runs one export: it walks the source's table schedule, opens
//! one ECF file per enabled table, and drains the source stream through the
//! table's mapper. The first error aborts the run.

use crate::adapters::source::{create_record_source, RecordSource, SourceSelection};
use crate::config::EcfExportConfig;
use crate::core::export::collapse::ClassGroupPolicy;
use crate::core::export::context::ExportContext;
use crate::core::export::schedule::ExportSchedule;
use crate::core::export::selection::{TablePlan, TableSelection};
use crate::core::export::sink::EcfTableWriter;
use crate::core::export::summary::{ExportFailure, ExportSummary};
use crate::core::mapping::create_mapper;
use crate::domain::{EcfError, Result};
use futures::StreamExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;

/// Export coordinator
pub struct ExportCoordinator {
    source: Arc<dyn RecordSource>,
    schedule: ExportSchedule,
    selection: TableSelection,
    policy: ClassGroupPolicy,
    target_folder: PathBuf,
    school_no: Option<String>,
    school_year_code: Option<String>,
    shutdown_signal: watch::Receiver<bool>,
}

impl ExportCoordinator {
    /// Create a coordinator reading from the configured source
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be created or the table
    /// selection is invalid.
    pub async fn new(
        config: &EcfExportConfig,
        shutdown_signal: watch::Receiver<bool>,
    ) -> Result<Self> {
        let source = create_record_source(config).await?;
        Self::with_source(config, source, shutdown_signal)
    }

    /// Create a coordinator over an existing record source
    ///
    /// # Errors
    ///
    /// Returns an error if the schedule or table selection is invalid.
    pub fn with_source(
        config: &EcfExportConfig,
        source: Arc<dyn RecordSource>,
        shutdown_signal: watch::Receiver<bool>,
    ) -> Result<Self> {
        let schedule = ExportSchedule::for_provider(source.provider())?;
        let selection = TableSelection::from_files(&config.files)?;

        for dependency in schedule.starved_dependencies(|table| selection.is_enabled(table)) {
            tracing::warn!(
                dependent = %dependency.dependent,
                provider = %dependency.provider,
                "Table is enabled but the table it depends on is not; it will be empty"
            );
        }

        Ok(Self {
            source,
            schedule,
            selection,
            policy: ClassGroupPolicy::from_flag(config.no_school_class_groups),
            target_folder: PathBuf::from(&config.target_folder_name),
            school_no: config.school_no.clone(),
            school_year_code: config.school_year_code.clone(),
            shutdown_signal,
        })
    }

    pub fn schedule(&self) -> &ExportSchedule {
        &self.schedule
    }

    /// Execute the export
    ///
    /// On failure the returned [`ExportFailure`] carries the tables and
    /// records completed before the error.
    pub async fn execute_export(&self) -> std::result::Result<ExportSummary, ExportFailure> {
        let start_time = Instant::now();
        let mut summary = ExportSummary::new();

        println!();
        println!("[Extracting] Start...");
        tracing::info!(
            provider = %self.source.provider(),
            target = %self.target_folder.display(),
            "Starting export process"
        );

        let result = self.run(&mut summary).await;
        let summary = summary.with_duration(start_time.elapsed());

        match result {
            Ok(()) => {
                println!(
                    "[Extracting] {} table(s) and {} record(s) extracted",
                    summary.total_tables, summary.total_records
                );
                summary.log_summary();
                Ok(summary)
            }
            Err(error) => {
                println!();
                println!(
                    "[Error] Extracting failed. Only {} table(s) and {} record(s) extracted",
                    summary.total_tables, summary.total_records
                );
                tracing::error!(
                    error = %error,
                    tables = summary.total_tables,
                    records = summary.total_records,
                    "Export failed"
                );
                Err(ExportFailure::new(summary, error))
            }
        }
    }

    async fn run(&self, summary: &mut ExportSummary) -> Result<()> {
        prepare_target_folder(&self.target_folder)?;

        let mut context = ExportContext::new();
        for &table in self.schedule.steps() {
            let Some(plan) = self.selection.resolve(table) else {
                tracing::debug!(table = %table, "Table not selected, skipping");
                continue;
            };

            let records = self.export_table(&plan, &mut context).await?;
            summary.add_table(table, records);
        }
        Ok(())
    }

    async fn export_table(&self, plan: &TablePlan, context: &mut ExportContext) -> Result<usize> {
        let table = plan.table;
        println!("[Extracting] [{}] Start...", table);
        self.check_cancelled()?;

        let mut mapper = create_mapper(self.source.provider(), table, self.policy);
        let path = self.target_folder.join(table.file_name());
        let mut writer = EcfTableWriter::create(&path)?;

        match &plan.headers {
            Some(headers) => writer.write_headers(headers.as_slice())?,
            None => writer.write_headers(mapper.default_headers())?,
        }

        let selection = SourceSelection::for_table(
            table,
            self.school_no.clone(),
            self.school_year_code.clone(),
        );
        let mut records = self.source.records(table, &selection).await?;

        let mut count = 0usize;
        loop {
            self.check_cancelled()?;
            let Some(record) = records.next().await else {
                break;
            };
            for row in mapper.map(record?, context)? {
                writer.write_row(&row)?;
                count += 1;
            }
        }
        writer.flush()?;

        println!("[Extracting] [{}] {} record(s) extracted", table, count);
        tracing::info!(table = %table, records = count, path = %path.display(), "Table exported");

        Ok(count)
    }

    fn check_cancelled(&self) -> Result<()> {
        if *self.shutdown_signal.borrow() {
            tracing::warn!("Shutdown signal received, aborting export");
            return Err(EcfError::Cancelled(
                "Shutdown signal received during export".to_string(),
            ));
        }
        Ok(())
    }
}

fn prepare_target_folder(folder: &Path) -> Result<()> {
    std::fs::create_dir_all(folder).map_err(|e| {
        EcfError::Io(format!(
            "Failed to create target folder {}: {}",
            folder.display(),
            e
        ))
    })
}
