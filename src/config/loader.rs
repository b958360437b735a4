//! Configuration loader with TOML/JSON parsing and environment variable overrides

use super::schema::{EcfConfig, SourceProvider};
use super::secret::secret_string;
use crate::domain::errors::EcfError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML (or `.json`) file
///
/// This function:
/// 1. Reads the file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the contents into EcfConfig
/// 4. Applies environment variable overrides (ECF_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - Parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use ecf_edoosys::config::loader::load_config;
///
/// let config = load_config("ecf-edoosys.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<EcfConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(EcfError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        EcfError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let mut config = parse_config(&contents, is_json)?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        EcfError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Parses configuration text without touching the process environment overrides
///
/// # Errors
///
/// Returns an error if substitution or parsing fails
pub fn parse_config(contents: &str, is_json: bool) -> Result<EcfConfig> {
    let contents = substitute_env_vars(contents, if is_json { None } else { Some('#') })?;

    if is_json {
        serde_json::from_str(&contents)
            .map_err(|e| EcfError::Configuration(format!("Failed to parse JSON: {}", e)))
    } else {
        toml::from_str(&contents)
            .map_err(|e| EcfError::Configuration(format!("Failed to parse TOML: {}", e)))
    }
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Lines starting with `comment` are copied untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str, comment: Option<char>) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| EcfError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        let is_comment = comment.is_some_and(|c| line.trim_start().starts_with(c));
        if is_comment {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(EcfError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

/// Applies environment variable overrides using the ECF_* prefix
///
/// Environment variables follow the pattern: ECF_<SECTION>_<KEY>
/// For example: ECF_EXPORT_SCHOOL_NO, ECF_LOGGING_LOCAL_PATH
fn apply_env_overrides(config: &mut EcfConfig) -> Result<()> {
    if let Ok(val) = std::env::var("ECF_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    let export = &mut config.ecf_export;
    if let Ok(val) = std::env::var("ECF_EXPORT_SOURCE_PROVIDER") {
        export.source_provider = val
            .parse::<SourceProvider>()
            .map_err(|e| EcfError::Configuration(format!("ECF_EXPORT_SOURCE_PROVIDER: {e}")))?;
    }
    if let Ok(val) = std::env::var("ECF_EXPORT_SOURCE_FILE_NAME") {
        export.source_file_name = Some(val);
    }
    if let Ok(val) = std::env::var("ECF_EXPORT_DATABASE_CONNECTION") {
        export.database_connection = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("ECF_EXPORT_TARGET_FOLDER_NAME") {
        export.target_folder_name = val;
    }
    if let Ok(val) = std::env::var("ECF_EXPORT_SCHOOL_NO") {
        export.school_no = Some(val);
    }
    if let Ok(val) = std::env::var("ECF_EXPORT_SCHOOL_YEAR_CODE") {
        export.school_year_code = Some(val);
    }
    if let Ok(val) = std::env::var("ECF_EXPORT_NO_SCHOOL_CLASS_GROUPS") {
        export.no_school_class_groups = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("ECF_EXPORT_SEPARATOR") {
        export.separator = Some(val);
    }

    if let Ok(val) = std::env::var("ECF_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("ECF_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("ECF_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}
