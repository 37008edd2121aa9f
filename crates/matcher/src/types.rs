//! Candidate and selection types produced and consumed by the matcher.

use catalog::{GenreId, GenreSchema, MovieId};
use std::collections::BTreeSet;

/// A catalog entry scored against a user selection.
///
/// Ephemeral: produced per recommendation request and discarded once the
/// final list is returned.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub entry_id: MovieId,
    pub title: String,
    /// Cosine similarity against the query vector; in [0, 1] for binary vectors
    pub similarity: f32,
    /// 1 − similarity; smaller means closer
    pub distance: f32,
}

impl Candidate {
    pub fn new(entry_id: MovieId, title: impl Into<String>, similarity: f32) -> Self {
        Self {
            entry_id,
            title: title.into(),
            similarity,
            distance: 1.0 - similarity,
        }
    }
}

/// A validated, non-empty set of genre axes.
///
/// Constructed through [`crate::selection::build_selection`], so an
/// instance always references axes of the schema it was built against.
/// Ids are kept ordered so the query vector is deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreSelection {
    ids: BTreeSet<GenreId>,
}

impl GenreSelection {
    pub(crate) fn from_ids(ids: BTreeSet<GenreId>) -> Self {
        Self { ids }
    }

    pub fn ids(&self) -> impl Iterator<Item = GenreId> + '_ {
        self.ids.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: GenreId) -> bool {
        self.ids.contains(&id)
    }

    /// Binary query vector in schema axis order: 1 at selected axes, 0
    /// elsewhere. Same dimensionality as every entry's genre vector.
    pub fn query_vector(&self, schema: &GenreSchema) -> Vec<u8> {
        let mut vector = vec![0u8; schema.len()];
        for id in &self.ids {
            if let Some(slot) = vector.get_mut(*id as usize) {
                *slot = 1;
            }
        }
        vector
    }
}
