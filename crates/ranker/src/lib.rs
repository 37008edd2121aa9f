//! Ranking of enriched candidates into the final recommendation list.
//!
//! This crate provides:
//! - The `EnrichedCandidate` record joining matcher output with enrichment
//! - The `RankPolicy` trait and its two implementations
//! - The `Ranker`, which applies a policy and truncates to top-N
//!
//! ## Policies
//! - **RatingPolicy** (default): external rating descending; a missing or
//!   failed rating sorts as 0.0, so un-enriched candidates land last while
//!   equal ratings keep their matcher order
//! - **SimilarityPolicy**: matcher order preserved, for runs where
//!   enrichment is skipped or disabled
//!
//! ## Example Usage
//! ```ignore
//! use ranker::{Ranker, RatingPolicy};
//!
//! let ranker = Ranker::new(RatingPolicy);
//! let top_five = ranker.rank(enriched_candidates, 5)?;
//! ```

pub mod error;
pub mod policies;
pub mod rank;
pub mod traits;
pub mod types;

// Re-export main types
pub use error::{RankError, Result};
pub use policies::{RatingPolicy, SimilarityPolicy};
pub use rank::{Ranker, DEFAULT_TOP_N};
pub use traits::RankPolicy;
pub use types::EnrichedCandidate;
