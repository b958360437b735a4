//! edoo.sys flat export file integration

pub mod reader;

pub use reader::EdoosysCsvReader;
