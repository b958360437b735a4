//! Validate config command implementation

use crate::adapters::postgresql::client::redact;
use crate::config::{load_config, EcfConfig, SourceProvider};
use crate::core::export::TableSelection;
use clap::Args;
use secrecy::ExposeSecret;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(config) => config,
            Err(e) => {
                println!("Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        if let Err(e) = TableSelection::from_files(&config.ecf_export.files) {
            println!("Configuration is invalid");
            println!("   Error: {e}");
            return Ok(2);
        }

        println!("Configuration is valid");
        println!();
        for line in summary_lines(&config) {
            println!("  {line}");
        }
        println!();
        Ok(0)
    }
}

fn summary_lines(config: &EcfConfig) -> Vec<String> {
    let export = &config.ecf_export;
    let mut lines = vec![
        format!("Log Level: {}", config.application.log_level),
        format!("Source Provider: {}", export.source_provider),
    ];

    match export.source_provider {
        SourceProvider::Csv => {
            lines.push(format!(
                "Source File: {}",
                export.source_file_name.as_deref().unwrap_or("-")
            ));
        }
        SourceProvider::Postgres => {
            let connection = export
                .database_connection
                .as_ref()
                .map(|secret| redact(secret.expose_secret().as_ref()))
                .unwrap_or_else(|| "-".to_string());
            lines.push(format!("Database: {connection}"));
        }
    }

    lines.push(format!(
        "School: {} {}",
        export.school_no.as_deref().unwrap_or("-"),
        export.school_year_code.as_deref().unwrap_or("-")
    ));
    lines.push(format!("Target Folder: {}", export.target_folder_name));
    lines.push(format!(
        "Class Groups: {}",
        if export.no_school_class_groups {
            "collapsed"
        } else {
            "kept"
        }
    ));
    lines.push(format!(
        "Tables: {}",
        if export.files.is_empty() {
            "all".to_string()
        } else {
            export
                .files
                .iter()
                .map(|file| file.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        }
    ));
    lines
}
