//! Plot-title banner parsing
//!
//! The first physical line of a temperature export reads like
//! `"Plot Title: Garrison Creek at Bennington "`. The site name is everything
//! after the first colon.

use crate::{Error, Result};

/// Extract the raw site name from the banner line
pub fn site_name_from_banner(line: &str, file: &str) -> Result<String> {
    let line = line.trim_start_matches('\u{feff}').trim_end_matches(['\r', '\n']);
    let (_, rest) = line.split_once(':').ok_or_else(|| {
        Error::structural_format(file, "first line has no plot title with a site name")
    })?;

    let name = rest
        .trim()
        .trim_end_matches(',')
        .trim_end()
        .trim_end_matches('"')
        .trim();

    if name.is_empty() {
        return Err(Error::structural_format(file, "plot title has an empty site name"));
    }
    Ok(name.to_string())
}
