//! Result type alias for the exporter

use super::errors::EcfError;

/// Result type alias for exporter operations
///
/// # Examples
///
/// ```
/// use ecf_edoosys::domain::result::Result;
/// use ecf_edoosys::domain::errors::EcfError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(EcfError::Source("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, EcfError>;
