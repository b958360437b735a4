//! edoo.sys source integrations.
//!
//! - [`source`] - Record source abstraction and factory
//! - [`csv`] - edoo.sys flat-file export reader
//! - [`postgresql`] - edoo.sys PostgreSQL database reader
//!
//! Both readers yield typed [`crate::domain::SourceRecord`] streams, so the
//! export pipeline can be tested against an in-memory source.
//!
//! ```rust,no_run
//! use ecf_edoosys::adapters::csv::EdoosysCsvReader;
//! use ecf_edoosys::adapters::source::{RecordSource, SourceSelection};
//! use ecf_edoosys::domain::EcfTable;
//! use futures::StreamExt;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = EdoosysCsvReader::new("export.csv", b';');
//! let selection = SourceSelection::for_table(EcfTable::Students, None, None);
//! let mut records = reader.records(EcfTable::Students, &selection).await?;
//! while let Some(record) = records.next().await {
//!     println!("{:?}", record?);
//! }
//! # Ok(())
//! # }
//! ```

pub mod csv;
pub mod postgresql;
pub mod source;
