//! Configuration schema types
//!
//! This module defines the configuration structure of the exporter.

use crate::config::SecretString;
use crate::domain::EcfTable;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Source provider selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceProvider {
    /// edoo.sys flat export file (semicolon separated)
    Csv,
    /// edoo.sys PostgreSQL database
    #[default]
    Postgres,
}

impl FromStr for SourceProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(SourceProvider::Csv),
            "postgres" | "postgresql" => Ok(SourceProvider::Postgres),
            other => Err(format!(
                "Invalid source provider '{other}'. Must be one of: csv, postgres"
            )),
        }
    }
}

impl std::fmt::Display for SourceProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceProvider::Csv => f.write_str("csv"),
            SourceProvider::Postgres => f.write_str("postgres"),
        }
    }
}

/// Main exporter configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EcfConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// ECF export settings
    pub ecf_export: EcfExportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl EcfConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.ecf_export.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Header override for one ECF table
///
/// When `files` is non-empty only the listed tables are exported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcfFileConfig {
    /// ECF table name (e.g. "Students")
    pub name: String,

    /// Explicit header list; empty means the mapper's default headers
    #[serde(default)]
    pub headers: Vec<String>,
}

/// ECF export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EcfExportConfig {
    /// Source provider (csv or postgres)
    #[serde(default)]
    pub source_provider: SourceProvider,

    /// edoo.sys flat export file (required if source_provider = csv)
    #[serde(default)]
    pub source_file_name: Option<String>,

    /// edoo.sys database connection string (required if source_provider = postgres)
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub database_connection: Option<SecretString>,

    /// Folder receiving the ECF files
    pub target_folder_name: String,

    /// School number used to filter database queries
    #[serde(default)]
    pub school_no: Option<String>,

    /// School year code used to filter database queries (e.g. "2021/22")
    #[serde(default)]
    pub school_year_code: Option<String>,

    /// Collapse class groups onto their root class (default: true)
    #[serde(default = "default_true")]
    pub no_school_class_groups: bool,

    /// Field separator of the flat export file (default: ";")
    #[serde(default)]
    pub separator: Option<String>,

    /// Per-table header overrides and table selection
    #[serde(default)]
    pub files: Vec<EcfFileConfig>,
}

impl EcfExportConfig {
    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if self.target_folder_name.trim().is_empty() {
            return Err("ecf_export.target_folder_name cannot be empty".to_string());
        }

        match self.source_provider {
            SourceProvider::Csv => {
                if self
                    .source_file_name
                    .as_deref()
                    .map_or(true, |name| name.trim().is_empty())
                {
                    return Err(
                        "ecf_export.source_file_name is required when source_provider = 'csv'"
                            .to_string(),
                    );
                }
            }
            SourceProvider::Postgres => {
                let Some(connection) = &self.database_connection else {
                    return Err(
                        "ecf_export.database_connection is required when source_provider = 'postgres'"
                            .to_string(),
                    );
                };
                let connection: &str = connection.expose_secret().as_ref();
                if !connection.starts_with("postgresql://") && !connection.starts_with("postgres://")
                {
                    return Err(
                        "ecf_export.database_connection must start with postgresql:// or postgres://"
                            .to_string(),
                    );
                }
            }
        }

        self.separator_byte()?;

        for file in &self.files {
            EcfTable::from_str(&file.name).map_err(|e| format!("ecf_export.files: {e}"))?;
        }

        Ok(())
    }

    /// The flat-file field separator as a single byte
    ///
    /// # Errors
    ///
    /// Returns an error unless the separator is exactly one ASCII character
    pub fn separator_byte(&self) -> Result<u8, String> {
        match self.separator.as_deref() {
            None | Some("") => Ok(b';'),
            Some(separator) if separator.len() == 1 && separator.is_ascii() => {
                Ok(separator.as_bytes()[0])
            }
            Some(separator) => Err(format!(
                "ecf_export.separator must be a single ASCII character, got '{separator}'"
            )),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log folder
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    fn csv_export() -> EcfExportConfig {
        EcfExportConfig {
            source_provider: SourceProvider::Csv,
            source_file_name: Some("export.csv".to_string()),
            database_connection: None,
            target_folder_name: "./ecf".to_string(),
            school_no: None,
            school_year_code: None,
            no_school_class_groups: true,
            separator: None,
            files: vec![],
        }
    }

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig::default();
        assert!(config.validate().is_ok());

        config.log_level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_csv_provider_requires_source_file() {
        let mut config = csv_export();
        assert!(config.validate().is_ok());

        config.source_file_name = Some("  ".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_postgres_provider_requires_connection() {
        let mut config = csv_export();
        config.source_provider = SourceProvider::Postgres;
        assert!(config.validate().is_err());

        config.database_connection = Some(secret_string("mysql://host/db".to_string()));
        assert!(config.validate().is_err());

        config.database_connection =
            Some(secret_string("postgresql://user:pw@localhost/edoosys".to_string()));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_separator_byte() {
        let mut config = csv_export();
        assert_eq!(config.separator_byte().unwrap(), b';');

        config.separator = Some(",".to_string());
        assert_eq!(config.separator_byte().unwrap(), b',');

        config.separator = Some(";;".to_string());
        assert!(config.separator_byte().is_err());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_file_table_rejected() {
        let mut config = csv_export();
        config.files.push(EcfFileConfig {
            name: "Rooms".to_string(),
            headers: vec![],
        });
        let err = config.validate().unwrap_err();
        assert!(err.contains("Rooms"));
    }

    #[test]
    fn test_source_provider_parse() {
        assert_eq!("CSV".parse::<SourceProvider>().unwrap(), SourceProvider::Csv);
        assert_eq!(
            "postgresql".parse::<SourceProvider>().unwrap(),
            SourceProvider::Postgres
        );
        assert!("mssql".parse::<SourceProvider>().is_err());
        assert_eq!(SourceProvider::default(), SourceProvider::Postgres);
    }

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert!(!config.local_enabled);
        assert_eq!(config.local_path, "./logs");
        assert_eq!(config.local_rotation, "daily");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_values() {
        assert_eq!(default_log_level(), "info");
        assert!(default_true());
        assert_eq!(default_local_rotation(), "daily");
    }
}
