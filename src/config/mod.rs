//! Configuration management for the exporter.
//!
//! # Overview
//!
//! The exporter reads a TOML configuration file (or JSON when the file has a
//! `.json` extension) with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `ECF_*` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use ecf_edoosys::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("ecf-edoosys.toml")?;
//!
//! println!("Provider: {}", config.ecf_export.source_provider);
//! println!("Target: {}", config.ecf_export.target_folder_name);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`EcfExportConfig`] - Source, target, school filter and table selection
//! - [`LoggingConfig`] - Local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [ecf_export]
//! source_provider = "postgres"
//! database_connection = "${ECF_EDOOSYS_CONNECTION}"
//! target_folder_name = "./ecf"
//! school_no = "012345"
//! school_year_code = "2021/22"
//! no_school_class_groups = true
//!
//! [[ecf_export.files]]
//! name = "Students"
//! headers = ["Id", "LastName", "FirstName"]
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_config, parse_config};
pub use schema::{
    ApplicationConfig, EcfConfig, EcfExportConfig, EcfFileConfig, LoggingConfig, SourceProvider,
};
pub use secret::{secret_string, SecretString, SecretValue};
