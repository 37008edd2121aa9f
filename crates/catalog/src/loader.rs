//! Catalog loading and validation.
//!
//! Builds a `Catalog` from a delimited tabular source: one `title` column
//! plus one binary column per genre. The genre enumeration comes from the
//! header, canonicalized so later lookups by name are case-insensitive.

use crate::error::{CatalogError, Result};
use crate::parser::{parse_flag, read_lines_latin1, sniff_delimiter, split_record};
use crate::types::{Catalog, CatalogEntry, MovieId, canonical_name, GenreSchema};
use rayon::prelude::*;
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

impl Catalog {
    /// Load a catalog from a delimited tabular file.
    ///
    /// The delimiter is sniffed from the header line, so a comma-separated
    /// file with a spreadsheet extension loads fine. Fails if the source is
    /// unreadable, a row is malformed or missing its title, or any row's
    /// genre vector disagrees with the declared enumeration.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let lines = read_lines_latin1(path)?;

        let mut rows = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| (idx + 1, line));

        let (header_line, header) = rows.next().ok_or_else(|| CatalogError::Parse {
            line: 1,
            reason: "empty catalog source".to_string(),
        })?;

        let delimiter = sniff_delimiter(header);
        let columns: Vec<String> = split_record(header, delimiter)
            .iter()
            .map(|c| canonical_name(c))
            .collect();

        let title_col = columns
            .iter()
            .position(|c| c == "title")
            .ok_or(CatalogError::MissingTitleColumn)?;

        let genre_names: Vec<String> = columns
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != title_col)
            .map(|(_, c)| c.clone())
            .collect();
        if genre_names.is_empty() {
            return Err(CatalogError::EmptySchema);
        }

        let mut seen = HashSet::new();
        for name in &genre_names {
            if !seen.insert(name.as_str()) {
                return Err(CatalogError::Parse {
                    line: header_line,
                    reason: format!("duplicate genre column {name:?}"),
                });
            }
        }

        let schema = GenreSchema::new(genre_names);
        let expected = schema.len();

        // Parse data rows in parallel; entry ids follow source order.
        let data_rows: Vec<(usize, &String)> = rows.collect();
        let entries: Vec<CatalogEntry> = data_rows
            .par_iter()
            .enumerate()
            .map(|(row_idx, &(line_no, line))| {
                parse_entry(line, line_no, delimiter, title_col, expected, row_idx as MovieId)
            })
            .collect::<Result<_>>()?;

        let catalog = Catalog::new(schema, entries);
        catalog.validate()?;

        info!(
            entries = catalog.len(),
            genres = catalog.schema().len(),
            delimiter = %delimiter,
            "catalog loaded"
        );
        Ok(catalog)
    }
}

/// Parse one data row into a `CatalogEntry`.
fn parse_entry(
    line: &str,
    line_no: usize,
    delimiter: char,
    title_col: usize,
    expected: usize,
    id: MovieId,
) -> Result<CatalogEntry> {
    let fields = split_record(line, delimiter);
    if fields.len() != expected + 1 {
        return Err(CatalogError::Schema {
            row: line_no,
            expected,
            found: fields.len().saturating_sub(1),
        });
    }

    let title = fields[title_col].trim();
    if title.is_empty() {
        return Err(CatalogError::Parse {
            line: line_no,
            reason: "missing title".to_string(),
        });
    }

    let mut genre_vector = Vec::with_capacity(expected);
    for (i, field) in fields.iter().enumerate() {
        if i == title_col {
            continue;
        }
        genre_vector.push(parse_flag(field, line_no)?);
    }

    Ok(CatalogEntry {
        id,
        title: title.to_string(),
        genre_vector,
    })
}
