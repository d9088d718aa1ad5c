//! One function per subcommand. Each renders to `out` so tests can capture it.

use std::io::Write;

use anyhow::{bail, Result};
use zonewise::{ConvertOptions, TimezoneConverter};

use crate::cli::ConvertArgs;
use crate::output::{print_json, print_zone_list, ConversionReport, ValidationReport};

pub fn current<W: Write>(
    converter: &TimezoneConverter,
    zone: &str,
    json: bool,
    out: &mut W,
) -> Result<()> {
    let now = converter.get_current_time(zone)?;
    if json {
        print_json(out, &now.summary())
    } else {
        writeln!(out, "Current time in {zone}: {now}")?;
        Ok(())
    }
}

pub fn convert<W: Write>(
    converter: &TimezoneConverter,
    args: &ConvertArgs,
    json: bool,
    out: &mut W,
) -> Result<()> {
    let options = ConvertOptions {
        format: args.format.clone(),
        disambiguation: args.disambiguation,
    };
    let converted = converter.convert_time_with(&args.time, &args.from_zone, &args.to_zone, &options)?;

    if json {
        let report = ConversionReport {
            input: &args.time,
            from: &args.from_zone,
            to: &args.to_zone,
            result: converted.summary(),
        };
        print_json(out, &report)
    } else {
        writeln!(out, "Converted time: {converted}")?;
        Ok(())
    }
}

pub fn list<W: Write>(
    converter: &TimezoneConverter,
    all: bool,
    json: bool,
    out: &mut W,
) -> Result<()> {
    if all {
        let zones = converter.available_zones();
        if json {
            return print_json(out, &zones);
        }
        print_zone_list(out, zones, &format!("All Timezones ({} total)", zones.len()))
    } else {
        let zones = converter.list_common_timezones();
        if json {
            return print_json(out, &zones);
        }
        print_zone_list(out, &zones, "Common Timezones")
    }
}

pub fn search<W: Write>(
    converter: &TimezoneConverter,
    term: &str,
    json: bool,
    out: &mut W,
) -> Result<()> {
    let results = converter.search_timezones(term);
    if json {
        return print_json(out, &results);
    }
    if results.is_empty() {
        writeln!(out, "No timezones found containing '{term}'")?;
        return Ok(());
    }
    print_zone_list(out, &results, &format!("Timezones containing '{term}'"))
}

pub fn validate<W: Write>(
    converter: &TimezoneConverter,
    zone: &str,
    json: bool,
    out: &mut W,
) -> Result<()> {
    let valid = converter.validate_timezone(zone);
    if json {
        print_json(out, &ValidationReport { zone, valid })?;
    } else if valid {
        writeln!(out, "'{zone}' is a valid timezone")?;
    }

    if !valid {
        bail!("'{zone}' is not a recognized timezone");
    }
    Ok(())
}
