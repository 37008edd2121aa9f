//! Core trait for ranking policies.
//!
//! This module defines the RankPolicy trait so the ordering criterion can
//! be swapped without touching the orchestrator.

use crate::types::EnrichedCandidate;

/// A ranking policy orders enriched candidates for final presentation.
///
/// ## Design Note
/// - `Send + Sync` allows policies to be shared across concurrent requests
/// - Policies take ownership of the Vec and return the reordered Vec
/// - Reordering must be deterministic and stable with respect to the
///   incoming (matcher) order, so ties are reproducible
/// - Truncation to top-N is the Ranker's job, not the policy's
pub trait RankPolicy: Send + Sync {
    /// Returns the name of this policy (for logging/debugging)
    fn name(&self) -> &str;

    /// Reorder the candidates.
    fn order(&self, candidates: Vec<EnrichedCandidate>) -> Vec<EnrichedCandidate>;
}
