//! Export orchestration
//!
//! This module provides the export pipeline for ECF files, including:
//! - Table scheduling and selection
//! - Class group collapsing and referential filtering
//! - ECF file writing
//! - Export coordination and summary reporting

pub mod collapse;
pub mod context;
pub mod coordinator;
pub mod schedule;
pub mod selection;
pub mod sink;
pub mod summary;

pub use collapse::{ClassGroupCollapser, ClassGroupPolicy, ResolvedClass};
pub use context::{DedupCache, ExportContext};
pub use coordinator::ExportCoordinator;
pub use schedule::{ExportSchedule, TableDependency};
pub use selection::{TablePlan, TableSelection};
pub use sink::{EcfTableWriter, ECF_DELIMITER};
pub use summary::{ExportFailure, ExportSummary, TableSummary};
