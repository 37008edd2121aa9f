//! # Matcher Crate
//!
//! This crate turns a user's genre selection into a ranked candidate set
//! by nearest-neighbor search over the catalog's genre-membership space.
//!
//! ## Components
//!
//! ### Selection building
//! Raw genre names from the presentation shell are validated against the
//! catalog schema (case-insensitive, duplicates collapse) before any
//! matching work starts. An empty or unknown selection is rejected here.
//!
//! ### Nearest-neighbor search
//! Every catalog entry is scored by cosine similarity against the binary
//! query vector. Cosine is scale-invariant, so movies with one genre flag
//! and movies with six compare fairly. Results come back ascending by
//! distance with ties broken by catalog insertion order, which keeps the
//! output fully deterministic.
//!
//! ## Example Usage
//!
//! ```ignore
//! use matcher::{build_selection, NearestMatcher};
//! use std::sync::Arc;
//!
//! let matcher = NearestMatcher::new(Arc::clone(&catalog));
//! let selection = build_selection(catalog.schema(), ["action", "crime"])?;
//!
//! // Ten closest entries, closest first
//! let candidates = matcher.find_nearest(&selection, 10)?;
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod selection;
pub mod nearest;

// Re-export commonly used types
pub use error::{MatchError, Result};
pub use nearest::NearestMatcher;
pub use selection::build_selection;
pub use types::{Candidate, GenreSelection};
