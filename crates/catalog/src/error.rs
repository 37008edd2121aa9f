//! Error types for the catalog crate.

use thiserror::Error;

/// Errors that can occur while loading and validating the movie catalog.
///
/// All of these are fatal at startup: a process with no valid catalog has
/// nothing to recommend from.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Source file could not be opened or read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A row or field couldn't be parsed
    ///
    /// This variant stores context about where the error occurred
    #[error("parse error at line {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// The header has no recognizable title column
    #[error("no title column found in catalog header")]
    MissingTitleColumn,

    /// The header declares no genre columns besides the title
    #[error("catalog header declares no genre columns")]
    EmptySchema,

    /// A row's genre vector length disagrees with the declared enumeration
    #[error("schema violation at row {row}: expected {expected} genre flags, found {found}")]
    Schema {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
