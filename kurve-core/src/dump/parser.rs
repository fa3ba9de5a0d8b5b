//! Extracting bytes from scanmem output.
//!
//! scanmem prints a dump as lines of two-digit hex tokens. Anything else on a
//! line is ignored.

use regex::Regex;

use crate::error::{DumpError, Result};

/// Line scanmem echoes before the output of a `dump` command.
pub const DUMP_MARKER: &str = "> dump";

const ERROR_PREFIX: &str = "error: ";
const PROCESS_NOT_FOUND: &str = "No such process";
const READ_MEMORY_FAILED: &str = "read memory failed";

lazy_static::lazy_static! {
    static ref HEX_BYTE_RE: Regex = Regex::new(r"\b[0-9A-Fa-f]{2}\b").unwrap();
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Only lines after [`DUMP_MARKER`] are data, and scanmem errors are reported.
    #[default]
    Strict,
    /// Every hex token of the input is data.
    Lenient,
}

pub fn parse(text: &str, mode: ParseMode) -> Result<Vec<u8>> {
    match mode {
        ParseMode::Strict => parse_strict(text),
        ParseMode::Lenient => parse_lenient(text),
    }
}

pub fn parse_strict(text: &str) -> Result<Vec<u8>> {
    let lines: Vec<&str> = text.lines().collect();

    if has_error(&lines, PROCESS_NOT_FOUND) {
        return Err(DumpError::ProcessNotFound);
    }
    if has_error(&lines, READ_MEMORY_FAILED) {
        return Err(DumpError::ReadMemoryFailed);
    }

    let mut bytes = Vec::new();
    let mut found_data = false;
    for line in lines {
        if found_data {
            bytes.extend(hex_bytes(line));
        }
        if line.starts_with(DUMP_MARKER) {
            found_data = true;
        }
    }

    if !found_data {
        log::warn!("no `{}` line in scanmem output", DUMP_MARKER);
    }
    log::debug!("parsed {} bytes", bytes.len());
    Ok(bytes)
}

pub fn parse_lenient(text: &str) -> Result<Vec<u8>> {
    if text.is_empty() {
        return Err(DumpError::EmptyInput);
    }

    let bytes: Vec<u8> = text.lines().flat_map(hex_bytes).collect();
    log::debug!("parsed {} bytes", bytes.len());
    Ok(bytes)
}

fn has_error(lines: &[&str], needle: &str) -> bool {
    lines
        .iter()
        .any(|line| line.starts_with(ERROR_PREFIX) && line.contains(needle))
}

fn hex_bytes(line: &str) -> impl Iterator<Item = u8> + '_ {
    HEX_BYTE_RE
        .find_iter(line)
        .filter_map(|token| u8::from_str_radix(token.as_str(), 16).ok())
}
