//! Source abstraction layer (trait-based)

pub mod factory;
pub mod traits;

pub use factory::create_record_source;
pub use traits::{RecordSource, RecordStream, SourceSelection};
