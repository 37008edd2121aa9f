//! The enriched candidate record consumed by ranking policies.

use enricher::{EnrichedFields, NO_DESCRIPTION};
use matcher::Candidate;

/// A matcher candidate plus its (possibly degraded) enrichment fields.
///
/// Created within one recommendation request and discarded once the final
/// list is returned; nothing here is persisted.
#[derive(Debug, Clone)]
pub struct EnrichedCandidate {
    pub candidate: Candidate,
    pub description: String,
    pub poster_url: Option<String>,
    pub rating: Option<f32>,
    pub source_link: Option<String>,
    pub lookup_succeeded: bool,
}

impl EnrichedCandidate {
    /// Merge a successful lookup into its candidate.
    pub fn enriched(candidate: Candidate, fields: EnrichedFields) -> Self {
        Self {
            candidate,
            description: fields.description,
            poster_url: fields.poster_url,
            rating: fields.rating,
            source_link: fields.source_link,
            lookup_succeeded: true,
        }
    }

    /// Sentinel-valued record for a failed or skipped lookup.
    pub fn unenriched(candidate: Candidate) -> Self {
        Self {
            candidate,
            description: NO_DESCRIPTION.to_string(),
            poster_url: None,
            rating: None,
            source_link: None,
            lookup_succeeded: false,
        }
    }

    /// Rating used for ordering: missing or failed ratings sort as 0.0.
    pub fn sort_rating(&self) -> f32 {
        self.rating.unwrap_or(0.0)
    }
}
