//! Site name resolution for both instrument families
//!
//! Logger workbooks carry hand-typed site labels, so unknown labels pass
//! through unchanged. Temperature exports carry a plot title that must match a
//! known site exactly (after whitespace normalization); an unknown title
//! rejects the file. The two policies are kept as separate lookups.

use crate::config::AliasConfig;
use crate::constants::{LOGGER_SITE_ALIASES, TEMPERATURE_SITE_ALIASES};
use crate::{Error, Result};
use std::collections::HashMap;
use tracing::debug;

#[cfg(test)]
pub mod tests;

/// Alias tables for logger labels and temperature banner names
#[derive(Debug, Clone)]
pub struct SiteResolver {
    /// Upper-cased, trimmed logger label → canonical ID
    logger: HashMap<String, String>,

    /// Whitespace-normalized banner name → canonical ID
    temperature: HashMap<String, String>,
}

impl Default for SiteResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SiteResolver {
    /// Create a resolver with the built-in alias tables
    pub fn new() -> Self {
        let logger = LOGGER_SITE_ALIASES
            .iter()
            .map(|(raw, site)| (logger_key(raw), site.to_string()))
            .collect();
        let temperature = TEMPERATURE_SITE_ALIASES
            .iter()
            .map(|(raw, site)| (normalize_whitespace(raw), site.to_string()))
            .collect();
        Self {
            logger,
            temperature,
        }
    }

    /// Add configured aliases without replacing built-in entries
    pub fn with_extensions(mut self, aliases: &AliasConfig) -> Self {
        for (raw, site) in &aliases.logger {
            let key = logger_key(raw);
            if self.logger.contains_key(&key) {
                debug!("Ignoring configured logger alias '{}': already defined", raw);
                continue;
            }
            self.logger.insert(key, site.trim().to_string());
        }
        for (raw, site) in &aliases.temperature {
            let key = normalize_whitespace(raw);
            if self.temperature.contains_key(&key) {
                debug!("Ignoring configured temperature alias '{}': already defined", raw);
                continue;
            }
            self.temperature.insert(key, site.trim().to_string());
        }
        self
    }

    /// Resolve a logger workbook label; unmapped labels pass through trimmed
    pub fn resolve_logger(&self, raw: &str) -> String {
        match self.logger.get(&logger_key(raw)) {
            Some(site) => site.clone(),
            None => {
                debug!("Logger site label '{}' has no alias; using it as-is", raw.trim());
                raw.trim().to_string()
            }
        }
    }

    /// Resolve a temperature banner name; unmapped names reject the file
    pub fn resolve_temperature(&self, raw: &str, file: &str) -> Result<String> {
        self.temperature
            .get(&normalize_whitespace(raw))
            .cloned()
            .ok_or_else(|| Error::unmapped_site_name(file, raw.trim()))
    }

    /// Logger aliases sorted by canonical ID, then label
    pub fn logger_aliases(&self) -> Vec<(&str, &str)> {
        sorted_pairs(&self.logger)
    }

    /// Temperature aliases sorted by canonical ID, then banner name
    pub fn temperature_aliases(&self) -> Vec<(&str, &str)> {
        sorted_pairs(&self.temperature)
    }
}

fn logger_key(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Collapse runs of whitespace to single spaces and trim the ends
pub fn normalize_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn sorted_pairs(map: &HashMap<String, String>) -> Vec<(&str, &str)> {
    let mut pairs: Vec<(&str, &str)> = map
        .iter()
        .map(|(raw, site)| (raw.as_str(), site.as_str()))
        .collect();
    pairs.sort_by(|a, b| a.1.cmp(b.1).then(a.0.cmp(b.0)));
    pairs
}
