//! Metadata enrichment client for the external title-lookup service.
//!
//! This crate augments matched candidates with description, poster URL,
//! and rating data from an external search-and-detail service. It handles:
//! - Title normalization before search (year suffixes, trailing articles)
//! - Rank-1 match selection and detail extraction priority
//! - Per-title timeouts and typed, non-fatal lookup errors
//! - An injected, bounded observability log of every attempt
//!
//! The external service is treated as unreliable by design: any failure is
//! a value, never a panic, and the orchestrator decides how to degrade.

pub mod enrich;
pub mod error;
pub mod log;
pub mod lookup;
pub mod normalize;

// Re-export the surface most callers need
pub use enrich::{EnrichedFields, Enricher, NO_DESCRIPTION};
pub use error::LookupError;
pub use log::{LookupLog, LookupLogEntry, LookupOutcome, MemoryLookupLog, DEFAULT_RETENTION};
pub use lookup::{HttpTitleLookup, TitleDetails, TitleLookup, TitleMatch};
pub use normalize::normalize_title;
