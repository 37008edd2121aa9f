//! Similarity-only ordering, used when enrichment is skipped or disabled.

use crate::traits::RankPolicy;
use crate::types::EnrichedCandidate;

/// Preserves the matcher's output order unchanged: the candidates arrive
/// already sorted by distance, and with no ratings to consult there is
/// nothing better to sort on.
pub struct SimilarityPolicy;

impl RankPolicy for SimilarityPolicy {
    fn name(&self) -> &str {
        "SimilarityPolicy"
    }

    fn order(&self, candidates: Vec<EnrichedCandidate>) -> Vec<EnrichedCandidate> {
        candidates
    }
}
