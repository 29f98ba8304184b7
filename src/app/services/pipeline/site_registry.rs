//! Per-site record of which files reported which date ranges
//!
//! A site normally comes from one file per collection trip. More than one file
//! for a site is worth a look, so the report flags it.

use crate::app::models::SiteMetadata;
use std::collections::BTreeMap;
use std::fmt::Write;
use tracing::{info, warn};

#[derive(Debug, Clone, Default)]
pub struct SiteRegistry {
    sites: BTreeMap<String, Vec<SiteMetadata>>,
}

impl SiteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the metadata one file produced for a site
    pub fn register(&mut self, site: impl Into<String>, metadata: SiteMetadata) {
        self.sites.entry(site.into()).or_default().push(metadata);
    }

    pub fn site_count(&self) -> usize {
        self.sites.len()
    }

    /// Metadata entries for a site, in registration order
    pub fn entries(&self, site: &str) -> &[SiteMetadata] {
        self.sites.get(site).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Sites reported by more than one file
    pub fn duplicate_sites(&self) -> Vec<&str> {
        self.sites
            .iter()
            .filter(|(_, entries)| entries.len() > 1)
            .map(|(site, _)| site.as_str())
            .collect()
    }

    /// Render the site report and mirror it to the log
    pub fn report(&self) -> String {
        let mut report = String::from("=== Site report ===\n");
        for (site, entries) in &self.sites {
            for entry in entries {
                let range = match (entry.earliest_date, entry.latest_date) {
                    (Some(first), Some(last)) => format!("{} to {}", first, last),
                    _ => "no dated records".to_string(),
                };
                let line = format!(
                    "{}: {} ({}, {} records)",
                    site,
                    entry.source_file.display(),
                    range,
                    entry.record_count
                );
                info!("{}", line);
                let _ = writeln!(report, "{}", line);
            }
            if entries.len() > 1 {
                let line = format!("WARNING: site {} reported by {} files", site, entries.len());
                warn!("{}", line);
                let _ = writeln!(report, "{}", line);
            }
        }
        report
    }
}
