// ECF Edoosys - edoo.sys to ECF Export Tool
// Copyright (c) 2025 ECF Edoosys Contributors
// Licensed under the MIT License

//! # ECF Edoosys - edoo.sys to ECF export
//!
//! ECF Edoosys exports school master data from edoo.sys into ECF (Education
//! Classes Format) files: one semicolon separated file per table with a
//! header row.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Reading** edoo.sys data from a flat export file or the edoo.sys database
//! - **Mapping** records to ECF rows with deterministic synthetic keys
//! - **Filtering** classes and teachers down to those actually referenced
//! - **Writing** `Teachers.csv`, `Subjects.csv`, `SchoolClasses.csv`,
//!   `Students.csv`, `StudentSchoolClassAttendances.csv` and `StudentSubjects.csv`
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Parsing, keys, mapping and export orchestration
//! - [`adapters`] - edoo.sys flat file and database readers
//! - [`domain`] - ECF tables, rows, source records and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ecf_edoosys::config::load_config;
//! use ecf_edoosys::core::export::ExportCoordinator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("ecf-edoosys.toml")?;
//!     let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!
//!     let coordinator = ExportCoordinator::new(&config.ecf_export, shutdown_rx).await?;
//!     let summary = coordinator.execute_export().await?;
//!
//!     println!("Exported {} records", summary.total_records);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! The library uses [`domain::EcfError`] for all errors. A failed export
//! returns [`core::export::ExportFailure`], which keeps the counts of the
//! tables finished before the error.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
