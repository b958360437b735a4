//! Core business logic for ECF Edoosys.
//!
//! # Modules
//!
//! - [`parse`] - edoo.sys field and composite cell parsing
//! - [`keys`] - Deterministic synthetic keys
//! - [`mapping`] - Source record to ECF row mappers
//! - [`export`] - Export scheduling, writing and coordination
//!
//! # Export Workflow
//!
//! 1. **Schedule**: Pick the table order for the configured source
//! 2. **Select**: Apply the configured file list and header overrides
//! 3. **Read**: Stream records per table from the flat file or database
//! 4. **Map**: Convert records to ECF rows, filtering by referenced ids
//! 5. **Write**: Emit one semicolon separated file per table
//! 6. **Report**: Print table and record counts
//!
//! # Example
//!
//! ```rust,no_run
//! use ecf_edoosys::config::load_config;
//! use ecf_edoosys::core::export::ExportCoordinator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("ecf-edoosys.toml")?;
//! let (_shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
//!
//! let coordinator = ExportCoordinator::new(&config.ecf_export, shutdown_rx).await?;
//! let summary = coordinator.execute_export().await?;
//!
//! println!("Tables: {}", summary.total_tables);
//! println!("Records: {}", summary.total_records);
//! # Ok(())
//! # }
//! ```

pub mod export;
pub mod keys;
pub mod mapping;
pub mod parse;
