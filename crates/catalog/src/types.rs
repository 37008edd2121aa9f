//! Core domain types for the movie catalog.
//!
//! The genre enumeration is part of catalog configuration, not hardcoded:
//! the set of axes comes from the source header at load time, and every
//! genre-membership vector is laid out in that axis order.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{CatalogError, Result};

// =============================================================================
// Type Aliases
// =============================================================================

/// Index of a genre axis within the catalog's fixed enumeration
pub type GenreId = u16;

/// Position-stable identifier of a catalog entry
pub type MovieId = u32;

/// Canonical form of a column or genre name: trimmed, lowercased, internal
/// whitespace collapsed to a single space.
///
/// All schema lookups go through this, so `"Sci-Fi"`, `"sci-fi"` and
/// `" SCI-FI "` resolve to the same axis.
pub fn canonical_name(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

// =============================================================================
// GenreSchema
// =============================================================================

/// The fixed, ordered genre enumeration of a catalog.
///
/// Axis order defines the layout of every `genre_vector`; lookups by name
/// are case/whitespace-insensitive against the canonicalized source header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenreSchema {
    names: Vec<String>,
    by_name: HashMap<String, GenreId>,
}

impl GenreSchema {
    /// Build a schema from raw column names, canonicalizing each one.
    pub fn new(raw_names: impl IntoIterator<Item = String>) -> Self {
        let names: Vec<String> = raw_names
            .into_iter()
            .map(|n| canonical_name(&n))
            .collect();
        let by_name = names
            .iter()
            .enumerate()
            .map(|(i, n)| (n.clone(), i as GenreId))
            .collect();
        Self { names, by_name }
    }

    /// Number of genre axes
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Resolve a genre name to its axis index (case/whitespace-insensitive)
    pub fn id_of(&self, name: &str) -> Option<GenreId> {
        self.by_name.get(&canonical_name(name)).copied()
    }

    /// Canonical name of an axis, if the id is in range
    pub fn name_of(&self, id: GenreId) -> Option<&str> {
        self.names.get(id as usize).map(String::as_str)
    }

    /// Canonical axis names in vector order
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

// =============================================================================
// CatalogEntry
// =============================================================================

/// A single movie with its genre-membership vector.
///
/// `genre_vector` entries are binary membership flags (not weights) aligned
/// to the schema's axis order. Invariant: `genre_vector.len()` equals the
/// schema length for every entry of a validated catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: MovieId,
    pub title: String,
    pub genre_vector: Vec<u8>,
}

impl CatalogEntry {
    /// Names of the genres this entry belongs to, in axis order.
    pub fn genre_names<'a>(&'a self, schema: &'a GenreSchema) -> Vec<&'a str> {
        self.genre_vector
            .iter()
            .enumerate()
            .filter(|&(_, &flag)| flag == 1)
            .filter_map(|(i, _)| schema.name_of(i as GenreId))
            .collect()
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// The full movie catalog: schema plus ordered entries.
///
/// Loaded once at startup and shared read-only (typically behind an `Arc`)
/// for the lifetime of the process. Entry order is source order, which the
/// matcher relies on for deterministic tie-breaking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    schema: GenreSchema,
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(schema: GenreSchema, entries: Vec<CatalogEntry>) -> Self {
        Self { schema, entries }
    }

    pub fn schema(&self) -> &GenreSchema {
        &self.schema
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get an entry by its position-stable id
    pub fn get(&self, id: MovieId) -> Option<&CatalogEntry> {
        self.entries.get(id as usize)
    }

    /// Check the dimensionality invariant over all entries.
    ///
    /// Every `genre_vector` must have exactly one flag per schema axis.
    pub fn validate(&self) -> Result<()> {
        let expected = self.schema.len();
        for entry in &self.entries {
            if entry.genre_vector.len() != expected {
                return Err(CatalogError::Schema {
                    row: entry.id as usize + 1,
                    expected,
                    found: entry.genre_vector.len(),
                });
            }
        }
        Ok(())
    }
}
