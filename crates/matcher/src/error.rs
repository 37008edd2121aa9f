//! Error types for the matcher crate.

use catalog::GenreId;
use thiserror::Error;

/// Invalid-selection errors, surfaced to the caller as user-correctable
/// input errors. No partial matching work happens once one is raised.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// The selection contains no genres at all
    #[error("genre selection is empty")]
    EmptySelection,

    /// A selected name is not part of the catalog's genre enumeration
    #[error("unknown genre: {name:?}")]
    UnknownGenre { name: String },

    /// A selected axis index is outside the catalog's enumeration
    #[error("genre id {id} is outside the catalog enumeration ({len} axes)")]
    GenreOutOfRange { id: GenreId, len: usize },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, MatchError>;
