//! Temperature / dissolved-oxygen logger CSV ingestion
//!
//! - [`banner`] - Site name from the plot-title line
//! - [`reconciler`] - Dual-sensor vs single-sensor layout detection
//! - [`parser`] - Canonical rows and readings

pub mod banner;
pub mod parser;
pub mod reconciler;

#[cfg(test)]
pub mod tests;

pub use parser::{parse_datetime, process_temperature_csv, process_temperature_file};
pub use reconciler::TemperatureLayout;
