//! # Catalog Crate
//!
//! This crate loads and holds the fixed movie catalog: one title per row
//! plus a binary genre-membership vector aligned to a fixed genre
//! enumeration taken from the source header.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (GenreSchema, CatalogEntry, Catalog)
//! - **parser**: Delimiter sniffing and quote-aware record splitting
//! - **loader**: Build and validate a Catalog from a source file
//! - **error**: Error types for catalog loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::Catalog;
//! use std::path::Path;
//!
//! // Load once at startup; share read-only afterwards
//! let catalog = Catalog::load_from_file(Path::new("data/movies.csv"))?;
//!
//! println!(
//!     "{} movies over {} genre axes",
//!     catalog.len(),
//!     catalog.schema().len()
//! );
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod loader;
mod parser;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use types::{
    // Type aliases
    GenreId,
    MovieId,
    // Core types
    Catalog,
    CatalogEntry,
    GenreSchema,
    // Helpers
    canonical_name,
};
