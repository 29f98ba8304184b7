//! Logger workbook ingestion
//!
//! - [`cells`] - Reader cell typing and serial date conversion
//! - [`reader`] - Loading sheets into owned grids
//! - [`reconciler`] - Structural checks and layout detection
//! - [`emitter`] - Canonical rows and median-tracked readings

pub mod cells;
pub mod emitter;
pub mod reader;
pub mod reconciler;

#[cfg(test)]
pub mod tests;

pub use emitter::{process_workbook, process_workbook_file};
pub use reader::{Workbook, Worksheet, read_workbook};
pub use reconciler::{ReconciledWorkbook, WorkbookLayout, reconcile};
