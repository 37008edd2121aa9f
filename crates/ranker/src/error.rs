//! Error types for the ranker crate.

use thiserror::Error;

/// Errors raised while producing the final ordered list. Surfaced to the
/// caller as user-correctable input errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RankError {
    /// The requested list length must be at least 1
    #[error("invalid top-N: {top_n} (must be at least 1)")]
    InvalidTopN { top_n: usize },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, RankError>;
