//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Configurable log levels
//! - Console output on stderr, keeping stdout for export progress
//! - Local JSON file logging with rotation
//!
//! # Example
//!
//! ```no_run
//! use ecf_edoosys::logging::init_logging;
//! use ecf_edoosys::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, parse_log_level, LoggingGuard};

