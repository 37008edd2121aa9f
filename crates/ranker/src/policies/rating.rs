//! Rating-first ordering, the default when enrichment ran.

use crate::traits::RankPolicy;
use crate::types::EnrichedCandidate;

/// Orders by external rating descending. Candidates without a rating
/// (failed or absent lookups) sort as 0.0 and land last. The sort is
/// stable, so equal ratings keep their matcher order.
pub struct RatingPolicy;

impl RankPolicy for RatingPolicy {
    fn name(&self) -> &str {
        "RatingPolicy"
    }

    fn order(&self, mut candidates: Vec<EnrichedCandidate>) -> Vec<EnrichedCandidate> {
        candidates.sort_by(|a, b| b.sort_rating().total_cmp(&a.sort_rating()));
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matcher::Candidate;

    fn record(id: u32, rating: Option<f32>) -> EnrichedCandidate {
        let mut record =
            EnrichedCandidate::unenriched(Candidate::new(id, format!("Movie {id}"), 0.5));
        record.rating = rating;
        record
    }

    #[test]
    fn test_orders_by_rating_descending() {
        let ordered = RatingPolicy.order(vec![
            record(1, Some(6.1)),
            record(2, Some(8.9)),
            record(3, Some(7.4)),
        ]);

        let ids: Vec<_> = ordered.iter().map(|r| r.candidate.entry_id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_missing_rating_sorts_last() {
        let ordered = RatingPolicy.order(vec![
            record(1, None),
            record(2, Some(3.2)),
        ]);

        let ids: Vec<_> = ordered.iter().map(|r| r.candidate.entry_id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_equal_ratings_keep_matcher_order() {
        let ordered = RatingPolicy.order(vec![
            record(7, Some(8.0)),
            record(3, Some(8.0)),
            record(9, Some(8.0)),
        ]);

        let ids: Vec<_> = ordered.iter().map(|r| r.candidate.entry_id).collect();
        assert_eq!(ids, vec![7, 3, 9]);
    }
}
