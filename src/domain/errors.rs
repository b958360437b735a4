//! Domain error types
//!
//! This module defines the error hierarchy for the exporter.
//! Errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main exporter error type
///
/// This is the primary error type used throughout the application.
/// Every variant is fatal for a run; non-fatal conditions (such as a
/// malformed composite-cell item) never surface as an `EcfError`.
#[derive(Debug, Error)]
pub enum EcfError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Source record errors (unexpected shape, unreadable row)
    #[error("Source error: {0}")]
    Source(String),

    /// edoo.sys database errors
    #[error("Database error: {0}")]
    Database(String),

    /// CSV reading or writing errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Export schedule errors
    #[error("Schedule error: {0}")]
    Schedule(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// The run was cancelled by a shutdown signal
    #[error("Export cancelled: {0}")]
    Cancelled(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl EcfError {
    /// Whether this error is a configuration problem (exit code 2)
    pub fn is_configuration(&self) -> bool {
        matches!(self, EcfError::Configuration(_) | EcfError::Schedule(_))
    }

    /// Whether this error was caused by a cancellation signal
    pub fn is_cancelled(&self) -> bool {
        matches!(self, EcfError::Cancelled(_))
    }
}

impl From<std::io::Error> for EcfError {
    fn from(err: std::io::Error) -> Self {
        EcfError::Io(err.to_string())
    }
}

impl From<csv::Error> for EcfError {
    fn from(err: csv::Error) -> Self {
        EcfError::Csv(err.to_string())
    }
}

impl From<serde_json::Error> for EcfError {
    fn from(err: serde_json::Error) -> Self {
        EcfError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for EcfError {
    fn from(err: toml::de::Error) -> Self {
        EcfError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl From<tokio_postgres::Error> for EcfError {
    fn from(err: tokio_postgres::Error) -> Self {
        EcfError::Database(err.to_string())
    }
}
