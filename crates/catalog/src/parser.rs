//! Record-level parsing for delimited catalog sources.
//!
//! The observed datasets are comma-separated even when the file carries a
//! spreadsheet-style extension, so the format is judged by content: the
//! delimiter is sniffed from the header line and fields are split with
//! quote support ("Heat, The (1995)" stays one field).

use crate::error::{CatalogError, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Candidate delimiters, in tie-break preference order
const DELIMITERS: [char; 3] = [',', ';', '\t'];

/// Read a file as lines, tolerating ISO-8859-1 (Latin-1) content.
///
/// Movie datasets frequently predate UTF-8. Latin-1 is a single-byte
/// encoding where each byte maps directly to the same Unicode code point,
/// so the fallback conversion never fails.
pub(crate) fn read_lines_latin1(path: &Path) -> Result<Vec<String>> {
    let mut file = File::open(path)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;

    let content: String = match String::from_utf8(bytes) {
        Ok(utf8) => utf8,
        Err(err) => err.into_bytes().iter().map(|&b| b as char).collect(),
    };

    Ok(content.lines().map(|s| s.to_string()).collect())
}

/// Pick the delimiter with the most out-of-quotes occurrences in the header.
pub(crate) fn sniff_delimiter(header: &str) -> char {
    let mut best = DELIMITERS[0];
    let mut best_count = 0usize;

    for &delim in &DELIMITERS {
        let mut count = 0usize;
        let mut in_quotes = false;
        for ch in header.chars() {
            match ch {
                '"' => in_quotes = !in_quotes,
                c if c == delim && !in_quotes => count += 1,
                _ => {}
            }
        }
        if count > best_count {
            best = delim;
            best_count = count;
        }
    }

    best
}

/// Split one record into fields, honoring double-quoted fields with
/// doubled-quote escapes.
pub(crate) fn split_record(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars().peekable();
    let mut in_quotes = false;

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(ch);
            }
        } else if ch == '"' {
            in_quotes = true;
        } else if ch == delimiter {
            fields.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
    }
    fields.push(current);

    fields
}

/// Parse one genre membership flag.
///
/// Accepts integer and float-formatted binary values ("0", "1", "0.0",
/// "1.0"; spreadsheet exports produce the latter). Anything else is
/// rejected, since the vector holds membership flags, not weights.
pub(crate) fn parse_flag(field: &str, line: usize) -> Result<u8> {
    match field.trim() {
        "0" | "0.0" => Ok(0),
        "1" | "1.0" => Ok(1),
        other => Err(CatalogError::Parse {
            line,
            reason: format!("expected binary genre flag, found {other:?}"),
        }),
    }
}
