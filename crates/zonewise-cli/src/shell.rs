//! Interactive prompt.
//!
//! Reads one command per line until `quit` or end of input. Conversion and
//! lookup errors are printed and the loop carries on; only I/O failures end
//! the session early.

use std::io::{BufRead, Write};

use anyhow::Result;
use tracing::debug;
use zonewise::TimezoneConverter;

use crate::output::print_zone_list;

const COMMANDS: &str = "current, convert, list, search, quit";

pub fn run<R: BufRead, W: Write>(
    converter: &TimezoneConverter,
    format: &str,
    mut input: R,
    mut out: W,
) -> Result<()> {
    writeln!(out, "zonewise interactive shell")?;
    writeln!(out, "Commands: {COMMANDS}")?;

    while let Some(line) = prompt(&mut input, &mut out, "\nCommand: ")? {
        let command = line.to_lowercase();
        debug!(%command, "shell command");
        match command.as_str() {
            "quit" | "exit" => break,
            "" => continue,
            "current" => current(converter, &mut input, &mut out)?,
            "convert" => convert(converter, format, &mut input, &mut out)?,
            "list" => list(converter, &mut input, &mut out)?,
            "search" => search(converter, &mut input, &mut out)?,
            "help" => writeln!(out, "Commands: {COMMANDS}")?,
            _ => writeln!(out, "Unknown command. Commands: {COMMANDS}")?,
        }
    }

    writeln!(out, "Goodbye.")?;
    Ok(())
}

/// Print `message`, then read one trimmed line. `None` at end of input.
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, message: &str) -> Result<Option<String>> {
    write!(out, "{message}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn current<R: BufRead, W: Write>(
    converter: &TimezoneConverter,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    let Some(zone) = prompt(input, out, "Timezone (or 'list' for common zones): ")? else {
        return Ok(());
    };
    if zone.eq_ignore_ascii_case("list") {
        return print_zone_list(out, &converter.list_common_timezones(), "Common Timezones");
    }

    match converter.get_current_time(&zone) {
        Ok(now) => writeln!(out, "Current time in {zone}: {now}")?,
        Err(e) => writeln!(out, "Error: {e}")?,
    }
    Ok(())
}

fn convert<R: BufRead, W: Write>(
    converter: &TimezoneConverter,
    format: &str,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "Time conversion (format: {format})")?;
    let Some(time) = prompt(input, out, "Time: ")? else {
        return Ok(());
    };
    let Some(from_zone) = prompt(input, out, "From timezone: ")? else {
        return Ok(());
    };
    let Some(to_zone) = prompt(input, out, "To timezone: ")? else {
        return Ok(());
    };

    match converter.convert_time(&time, &from_zone, &to_zone, format) {
        Ok(converted) => writeln!(out, "Converted time: {converted}")?,
        Err(e) => writeln!(out, "Error: {e}")?,
    }
    Ok(())
}

fn list<R: BufRead, W: Write>(
    converter: &TimezoneConverter,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    let Some(choice) = prompt(input, out, "List (c)ommon or (a)ll timezones? [c/a]: ")? else {
        return Ok(());
    };
    if !choice.eq_ignore_ascii_case("a") {
        return print_zone_list(out, &converter.list_common_timezones(), "Common Timezones");
    }

    let zones = converter.available_zones();
    writeln!(out, "{} timezones available; 'search' narrows this down.", zones.len())?;
    let Some(confirm) = prompt(input, out, "Show all? [y/N]: ")? else {
        return Ok(());
    };
    if confirm.eq_ignore_ascii_case("y") {
        print_zone_list(out, zones, "All Timezones")?;
    }
    Ok(())
}

fn search<R: BufRead, W: Write>(
    converter: &TimezoneConverter,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    let Some(term) = prompt(input, out, "Search term: ")? else {
        return Ok(());
    };
    if term.is_empty() {
        return Ok(());
    }

    let results = converter.search_timezones(&term);
    if results.is_empty() {
        writeln!(out, "No timezones found containing '{term}'")?;
        return Ok(());
    }
    print_zone_list(out, &results, &format!("Timezones containing '{term}'"))
}
