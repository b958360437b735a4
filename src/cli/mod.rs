//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for ECF Edoosys using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// ECF Edoosys - edoo.sys to ECF export tool
#[derive(Parser, Debug)]
#[command(name = "ecf-edoosys")]
#[command(version, about, long_about = None)]
#[command(author = "ECF Edoosys Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "ecf-edoosys.toml", env = "ECF_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "ECF_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export edoo.sys data to ECF files
    Export(commands::export::ExportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
