//! Domain models and types for the exporter.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Target schema** ([`EcfTable`], [`EcfHeaders`], [`EcfRow`], [`Gender`])
//! - **Source records** ([`FlatRecord`], [`SourceRecord`] and the typed database rows)
//! - **Error types** ([`EcfError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, EcfError>`]:
//!
//! ```rust
//! use ecf_edoosys::domain::{EcfError, Result};
//!
//! fn example() -> Result<()> {
//!     let config = ecf_edoosys::config::load_config("ecf-edoosys.toml")?;
//!     Ok(())
//! }
//! ```

pub mod ecf;
pub mod errors;
pub mod records;
pub mod result;

pub use ecf::{EcfHeaders, EcfRow, EcfTable, EcfValue, Gender};
pub use errors::EcfError;
pub use records::{
    AttendanceRecord, FlatRecord, HeaderIndex, SchoolClassRecord, SourceRecord, StudentRecord,
    StudentSubjectRecord, SubjectRecord, TeacherRecord,
};
pub use result::Result;
