//! The Ranker applies a policy and truncates to the requested top-N.

use crate::error::{RankError, Result};
use crate::traits::RankPolicy;
use crate::types::EnrichedCandidate;
use tracing::debug;

/// Default length of the final recommendation list
pub const DEFAULT_TOP_N: usize = 5;

/// Produces the final ordered list from enriched candidates.
///
/// ## Usage
/// ```ignore
/// let ranker = Ranker::new(RatingPolicy);
/// let top = ranker.rank(enriched_candidates, 5)?;
/// ```
pub struct Ranker {
    policy: Box<dyn RankPolicy>,
}

impl Ranker {
    pub fn new(policy: impl RankPolicy + 'static) -> Self {
        Self {
            policy: Box::new(policy),
        }
    }

    /// Order with the configured policy, then truncate to `top_n`.
    ///
    /// A shorter input simply yields a shorter list; only `top_n == 0`
    /// is an error.
    pub fn rank(
        &self,
        candidates: Vec<EnrichedCandidate>,
        top_n: usize,
    ) -> Result<Vec<EnrichedCandidate>> {
        if top_n == 0 {
            return Err(RankError::InvalidTopN { top_n });
        }

        debug!(
            policy = self.policy.name(),
            input = candidates.len(),
            top_n,
            "ranking candidates"
        );

        let mut ordered = self.policy.order(candidates);
        ordered.truncate(top_n);
        Ok(ordered)
    }
}
