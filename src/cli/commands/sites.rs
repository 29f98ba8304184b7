//! Sites command implementation
//!
//! Prints the site alias tables the processor resolves labels with, including
//! any extensions from the configuration file.

use super::shared::setup_logging;
use crate::app::models::InstrumentMode;
use crate::app::services::site_resolver::SiteResolver;
use crate::cli::args::{OutputFormat, SitesArgs};
use crate::config::Config;
use crate::{Error, Result};
use colored::*;
use tracing::{debug, info};

/// One alias table entry tagged with its instrument family
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct AliasEntry {
    pub mode: InstrumentMode,
    pub label: String,
    pub site: String,
}

/// Sites command runner
pub async fn run_sites(args: SitesArgs) -> Result<Vec<AliasEntry>> {
    setup_logging(args.get_log_level(), true)?;
    debug!("Sites arguments: {:?}", args);

    let config = Config::load_layered(args.config_file.as_deref())?;
    let resolver = SiteResolver::new().with_extensions(&config.aliases);
    let entries = alias_entries(&resolver, args.mode);
    info!("Listing {} site aliases", entries.len());

    match args.output_format {
        OutputFormat::Human => print_human(&entries),
        OutputFormat::Json => print_json(&entries)?,
        OutputFormat::Csv => print_csv(&entries)?,
    }

    Ok(entries)
}

/// Collect alias entries, optionally for a single instrument family
pub fn alias_entries(resolver: &SiteResolver, mode: Option<InstrumentMode>) -> Vec<AliasEntry> {
    let mut entries = Vec::new();
    for family in InstrumentMode::all_values() {
        if mode.is_some_and(|wanted| wanted != family) {
            continue;
        }
        let table = match family {
            InstrumentMode::Logger => resolver.logger_aliases(),
            InstrumentMode::Temperature => resolver.temperature_aliases(),
        };
        entries.extend(table.into_iter().map(|(label, site)| AliasEntry {
            mode: family,
            label: label.to_string(),
            site: site.to_string(),
        }));
    }
    entries
}

fn print_human(entries: &[AliasEntry]) {
    let mut current = None;
    for entry in entries {
        if current != Some(entry.mode) {
            let heading = match entry.mode {
                InstrumentMode::Logger => {
                    "Logger workbook labels (case-insensitive, unlisted pass through)"
                }
                InstrumentMode::Temperature => {
                    "Temperature export banners (exact, unlisted reject the file)"
                }
            };
            println!("\n{}", heading.bold());
            current = Some(entry.mode);
        }
        println!("   • {:<34} -> {}", entry.label, entry.site.green());
    }
    println!();
}

fn print_json(entries: &[AliasEntry]) -> Result<()> {
    let rendered = serde_json::to_string_pretty(entries)
        .map_err(|e| Error::data_validation(format!("Cannot render JSON: {}", e)))?;
    println!("{}", rendered);
    Ok(())
}

fn print_csv(entries: &[AliasEntry]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(std::io::stdout());
    writer.write_record(["mode", "label", "site"])?;
    for entry in entries {
        let mode = entry.mode.to_string();
        writer.write_record([mode.as_str(), entry.label.as_str(), entry.site.as_str()])?;
    }
    writer.flush()?;
    Ok(())
}
