//! Nearest-neighbor search over the genre-membership space.
//!
//! ## Algorithm
//! 1. Build the binary query vector from the validated selection
//! 2. Score every catalog entry by cosine similarity (scale-invariant,
//!    so a one-genre movie and a six-genre movie compare fairly)
//! 3. Order ascending by distance = 1 − similarity, ties broken by
//!    catalog insertion order
//! 4. Return the first k, clamped to the catalog size

use crate::error::{MatchError, Result};
use crate::types::{Candidate, GenreSelection};
use catalog::Catalog;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Scores catalog entries against a user selection by cosine similarity.
///
/// Pure with respect to catalog and selection: no hidden state, identical
/// inputs produce the identical ordered output.
pub struct NearestMatcher {
    /// Shared reference to the catalog (read-only, so no locking needed)
    catalog: Arc<Catalog>,
}

impl NearestMatcher {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// The `k` entries closest to the selection.
    ///
    /// `k` greater than the catalog size clamps to the catalog size; an
    /// empty or tiny catalog is a legitimate edge case, not an error.
    #[instrument(skip(self, selection), fields(selected = selection.len(), k))]
    pub fn find_nearest(&self, selection: &GenreSelection, k: usize) -> Result<Vec<Candidate>> {
        let schema = self.catalog.schema();
        if selection.is_empty() {
            return Err(MatchError::EmptySelection);
        }
        if let Some(id) = selection.ids().find(|&id| (id as usize) >= schema.len()) {
            return Err(MatchError::GenreOutOfRange {
                id,
                len: schema.len(),
            });
        }

        let query = selection.query_vector(schema);
        let query_norm = (selection.len() as f32).sqrt();

        let mut candidates: Vec<Candidate> = self
            .catalog
            .entries()
            .par_iter()
            .map(|entry| {
                let similarity = cosine_similarity(&query, query_norm, &entry.genre_vector);
                Candidate::new(entry.id, entry.title.clone(), similarity)
            })
            .collect();

        // Stable sort: equal distances keep catalog insertion order.
        candidates.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        candidates.truncate(k.min(self.catalog.len()));

        debug!(returned = candidates.len(), "nearest-neighbor scan complete");
        Ok(candidates)
    }
}

/// Cosine similarity between the binary query vector and an entry vector.
///
/// A zero-magnitude entry (no genre flags set) scores 0.0, never NaN.
fn cosine_similarity(query: &[u8], query_norm: f32, entry: &[u8]) -> f32 {
    let mut dot = 0u32;
    let mut entry_ones = 0u32;
    for (&q, &e) in query.iter().zip(entry) {
        dot += u32::from(q & e);
        entry_ones += u32::from(e);
    }

    if entry_ones == 0 {
        return 0.0;
    }
    dot as f32 / (query_norm * (entry_ones as f32).sqrt())
}
