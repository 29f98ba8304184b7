//! Processing pipeline
//!
//! - [`context`] - Borrowed sinks handed to each file reader
//! - [`runner`] - Scan, normalize, aggregate and write a whole run
//! - [`site_registry`] - Which files reported which sites
//! - [`stats`] - Run counters for the control surface
//! - [`status`] - Progress events sent to the control surface

pub mod context;
pub mod runner;
pub mod site_registry;
pub mod stats;
pub mod status;

#[cfg(test)]
pub mod tests;

pub use context::{FileContext, FileOutcome};
pub use runner::PipelineRunner;
pub use site_registry::SiteRegistry;
pub use stats::RunStats;
pub use status::{StatusSender, status_channel};
