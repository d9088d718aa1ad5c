//! Human-readable and JSON rendering.

use std::io::Write;

use anyhow::Result;
use serde::Serialize;
use zonewise::ZonedSummary;

/// JSON shape for the `convert` command.
#[derive(Debug, Serialize)]
pub struct ConversionReport<'a> {
    pub input: &'a str,
    pub from: &'a str,
    pub to: &'a str,
    pub result: ZonedSummary,
}

/// JSON shape for the `validate` command.
#[derive(Debug, Serialize)]
pub struct ValidationReport<'a> {
    pub zone: &'a str,
    pub valid: bool,
}

/// Write `value` as pretty-printed JSON followed by a newline.
pub fn print_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Numbered list under an underlined title:
///
/// ```text
/// Common Timezones:
/// ----------------
///  1. UTC
///  2. US/Eastern
/// ```
pub fn print_zone_list<W: Write, S: AsRef<str>>(out: &mut W, zones: &[S], title: &str) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{title}:")?;
    writeln!(out, "{}", "-".repeat(title.len()))?;
    for (i, zone) in zones.iter().enumerate() {
        writeln!(out, "{:2}. {}", i + 1, zone.as_ref())?;
    }
    writeln!(out)?;
    Ok(())
}
