//! # Recommendation Orchestrator
//!
//! This module coordinates one recommendation request end to end:
//! 1. Validate the genre selection against the catalog schema
//! 2. Fetch an oversampled nearest-neighbor candidate set
//! 3. Enrich candidates concurrently (bounded fan-out, best-effort)
//! 4. Rank with the policy implied by the enrichment mode
//! 5. Truncate to the requested top-N
//!
//! Lookup failures never escape this layer: each one degrades its own
//! candidate to sentinel fields and shows up only in the observability
//! log. Only validation errors reach the caller.

use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};

use catalog::Catalog;
use enricher::Enricher;
use matcher::{build_selection, Candidate, MatchError, NearestMatcher};
use ranker::{EnrichedCandidate, RankError, Ranker, RatingPolicy, SimilarityPolicy};

/// Extra candidates fetched beyond top-N. Enrichment is best-effort and
/// rating-based reranking may demote near matches below the cut, so the
/// matcher hands over more than strictly requested.
const OVERSAMPLE_FACTOR: usize = 2;

/// Default bound on concurrent enrichment lookups. The external service
/// has its own rate limits; 1 gives fully sequential lookups.
const DEFAULT_FAN_OUT: usize = 4;

/// Errors surfaced to the caller of `recommend`.
///
/// Both variants are user-correctable input errors; the request is
/// rejected before any partial work happens.
#[derive(Error, Debug)]
pub enum RecommendError {
    /// The genre selection is empty or names an unknown genre
    #[error("invalid genre selection: {0}")]
    InvalidSelection(#[from] MatchError),

    /// The requested top-N is invalid
    #[error(transparent)]
    InvalidTopN(#[from] RankError),
}

/// Main orchestrator sequencing catalog -> matcher -> enricher -> ranker.
pub struct Recommender {
    catalog: Arc<Catalog>,
    matcher: NearestMatcher,
    enricher: Arc<Enricher>,
    rating_ranker: Ranker,
    similarity_ranker: Ranker,
    fan_out: usize,
    oversample: usize,
}

impl Recommender {
    /// Create a recommender over a loaded catalog and a configured enricher.
    pub fn new(catalog: Arc<Catalog>, enricher: Enricher) -> Self {
        let matcher = NearestMatcher::new(Arc::clone(&catalog));
        Self {
            catalog,
            matcher,
            enricher: Arc::new(enricher),
            rating_ranker: Ranker::new(RatingPolicy),
            similarity_ranker: Ranker::new(SimilarityPolicy),
            fan_out: DEFAULT_FAN_OUT,
            oversample: OVERSAMPLE_FACTOR,
        }
    }

    /// Configure the enrichment fan-out bound (default: 4, minimum: 1)
    pub fn with_fan_out(mut self, fan_out: usize) -> Self {
        self.fan_out = fan_out.max(1);
        self
    }

    /// Configure the oversampling factor (default: 2, minimum: 1)
    pub fn with_oversample(mut self, factor: usize) -> Self {
        self.oversample = factor.max(1);
        self
    }

    /// Main entry point: a ranked, enriched top-N list for a genre selection.
    ///
    /// Raises only for validation failures. A request where every lookup
    /// fails still returns a full list with sentinel fields; dropping the
    /// returned future aborts any in-flight lookups without leaving a
    /// partial result behind.
    pub async fn recommend(
        &self,
        genre_names: &[String],
        top_n: usize,
        enrichment_enabled: bool,
    ) -> Result<Vec<EnrichedCandidate>, RecommendError> {
        let start_time = Instant::now();

        if top_n == 0 {
            // Rejected before any matching or lookup work happens.
            return Err(RankError::InvalidTopN { top_n }.into());
        }

        let selection = build_selection(self.catalog.schema(), genre_names)?;
        info!(
            genres = selection.len(),
            top_n, enrichment_enabled, "selection validated"
        );

        let k = top_n.max(top_n.saturating_mul(self.oversample));
        let candidates = self.matcher.find_nearest(&selection, k)?;
        info!(candidates = candidates.len(), k, "matcher returned candidates");

        let ranked = if enrichment_enabled {
            let enriched = self.enrich_all(candidates).await;
            self.rating_ranker.rank(enriched, top_n)?
        } else {
            let passthrough = candidates
                .into_iter()
                .map(EnrichedCandidate::unenriched)
                .collect();
            self.similarity_ranker.rank(passthrough, top_n)?
        };

        info!(
            returned = ranked.len(),
            elapsed = ?start_time.elapsed(),
            "recommendation complete"
        );
        Ok(ranked)
    }

    /// Enrich all candidates with bounded concurrency.
    ///
    /// Each result lands in its own pre-sized slot by candidate index, so
    /// completion order never affects output order and the result vector
    /// needs no locking. Dropping the future aborts the JoinSet and with
    /// it every in-flight lookup.
    async fn enrich_all(&self, candidates: Vec<Candidate>) -> Vec<EnrichedCandidate> {
        let mut slots: Vec<Option<EnrichedCandidate>> = Vec::with_capacity(candidates.len());
        slots.resize_with(candidates.len(), || None);

        let semaphore = Arc::new(Semaphore::new(self.fan_out));
        let mut tasks = JoinSet::new();

        for (index, candidate) in candidates.into_iter().enumerate() {
            let enricher = Arc::clone(&self.enricher);
            let semaphore = Arc::clone(&semaphore);
            tasks.spawn(async move {
                // A closed semaphore means the request is being torn down.
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return (index, EnrichedCandidate::unenriched(candidate));
                };
                let record = match enricher.enrich(&candidate.title).await {
                    Ok(fields) => EnrichedCandidate::enriched(candidate, fields),
                    Err(_) => EnrichedCandidate::unenriched(candidate),
                };
                (index, record)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, record)) => {
                    if let Some(slot) = slots.get_mut(index) {
                        *slot = Some(record);
                    }
                }
                Err(join_error) => warn!(error = %join_error, "enrichment task failed to join"),
            }
        }

        slots.into_iter().flatten().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use catalog::{CatalogEntry, GenreSchema};
    use enricher::{
        LookupError, MemoryLookupLog, TitleDetails, TitleLookup, TitleMatch, NO_DESCRIPTION,
    };
    use std::collections::HashMap;
    use std::time::Duration;

    // ============================================================================
    // Test Fixtures
    // ============================================================================

    /// Minimal catalog: axes [action, crime, drama, animation, children, comedy]
    fn build_test_catalog() -> Arc<Catalog> {
        let schema = GenreSchema::new(
            ["action", "crime", "drama", "animation", "children", "comedy"]
                .into_iter()
                .map(String::from),
        );

        let entries = vec![
            CatalogEntry {
                id: 0,
                title: "Heat (1995)".to_string(),
                genre_vector: vec![1, 1, 0, 0, 0, 0],
            },
            CatalogEntry {
                id: 1,
                title: "Casino (1995)".to_string(),
                genre_vector: vec![0, 1, 1, 0, 0, 0],
            },
            CatalogEntry {
                id: 2,
                title: "Sudden Death (1995)".to_string(),
                genre_vector: vec![1, 0, 0, 0, 0, 0],
            },
            CatalogEntry {
                id: 3,
                title: "Toy Story (1995)".to_string(),
                genre_vector: vec![0, 0, 0, 1, 1, 1],
            },
        ];

        Arc::new(Catalog::new(schema, entries))
    }

    // ============================================================================
    // Scripted lookup collaborator
    // ============================================================================

    /// Deterministic stand-in for the external title service.
    struct ScriptedLookup {
        /// Normalized query -> (match id, details); anything else misses
        responses: HashMap<String, (String, TitleDetails)>,
        /// When set, every search fails with a 503
        fail_all: bool,
        /// Artificial latency per search, for timeout/cancellation tests
        delay: Option<Duration>,
    }

    impl ScriptedLookup {
        fn new() -> Self {
            Self {
                responses: HashMap::new(),
                fail_all: false,
                delay: None,
            }
        }

        fn with_rating(mut self, query: &str, id: &str, rating: f32) -> Self {
            let details = TitleDetails {
                plot_outline: Some(format!("Plot of {query}.")),
                rating: Some(rating),
                ..TitleDetails::default()
            };
            self.responses
                .insert(query.to_string(), (id.to_string(), details));
            self
        }

        fn failing() -> Self {
            Self {
                responses: HashMap::new(),
                fail_all: true,
                delay: None,
            }
        }
    }

    #[async_trait]
    impl TitleLookup for ScriptedLookup {
        async fn search(&self, query: &str) -> Result<Vec<TitleMatch>, LookupError> {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail_all {
                return Err(LookupError::Status { status: 503 });
            }
            Ok(self
                .responses
                .get(query)
                .map(|(id, _)| {
                    vec![TitleMatch {
                        id: id.clone(),
                        title: query.to_string(),
                        year: None,
                    }]
                })
                .unwrap_or_default())
        }

        async fn details(&self, id: &str) -> Result<TitleDetails, LookupError> {
            self.responses
                .values()
                .find(|(match_id, _)| match_id == id)
                .map(|(_, details)| details.clone())
                .ok_or_else(|| LookupError::NoMatch {
                    query: id.to_string(),
                })
        }
    }

    fn build_recommender(lookup: ScriptedLookup, log: Arc<MemoryLookupLog>) -> Recommender {
        let enricher = Enricher::new(Arc::new(lookup), log);
        Recommender::new(build_test_catalog(), enricher)
    }

    fn genres(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    // ============================================================================
    // Validation
    // ============================================================================

    #[tokio::test]
    async fn test_empty_selection_rejected_before_any_lookup() {
        let log = Arc::new(MemoryLookupLog::default());
        let recommender = build_recommender(ScriptedLookup::new(), log.clone());

        let result = recommender.recommend(&[], 5, true).await;

        assert!(matches!(
            result,
            Err(RecommendError::InvalidSelection(MatchError::EmptySelection))
        ));
        assert!(log.is_empty(), "no lookups may happen for a rejected request");
    }

    #[tokio::test]
    async fn test_unknown_genre_rejected() {
        let log = Arc::new(MemoryLookupLog::default());
        let recommender = build_recommender(ScriptedLookup::new(), log.clone());

        let result = recommender
            .recommend(&genres(&["action", "underwater-basket-weaving"]), 5, true)
            .await;

        assert!(matches!(
            result,
            Err(RecommendError::InvalidSelection(
                MatchError::UnknownGenre { .. }
            ))
        ));
        assert!(log.is_empty());
    }

    #[tokio::test]
    async fn test_zero_top_n_rejected_before_any_lookup() {
        let log = Arc::new(MemoryLookupLog::default());
        let recommender = build_recommender(ScriptedLookup::new(), log.clone());

        let result = recommender.recommend(&genres(&["action"]), 0, true).await;

        assert!(matches!(
            result,
            Err(RecommendError::InvalidTopN(RankError::InvalidTopN {
                top_n: 0
            }))
        ));
        assert!(log.is_empty());
    }

    // ============================================================================
    // Happy path and ranking interplay
    // ============================================================================

    #[tokio::test]
    async fn test_exact_genre_match_tops_the_list() {
        // {action, crime} puts Heat first with cosine similarity 1.0
        let lookup = ScriptedLookup::new()
            .with_rating("Heat", "tt1", 8.3)
            .with_rating("Casino", "tt2", 8.2)
            .with_rating("Sudden Death", "tt3", 5.8);
        let log = Arc::new(MemoryLookupLog::default());
        let recommender = build_recommender(lookup, log);

        let result = recommender
            .recommend(&genres(&["action", "crime"]), 1, true)
            .await
            .unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].candidate.title, "Heat (1995)");
        assert!((result[0].candidate.similarity - 1.0).abs() < 1e-6);
        assert!(result[0].lookup_succeeded);
        assert_eq!(result[0].rating, Some(8.3));
    }

    #[tokio::test]
    async fn test_rating_rerank_promotes_oversampled_candidate() {
        // By similarity alone, {action} orders: Sudden Death (1.0),
        // Heat (0.707), then Casino. Casino's high rating must pull it
        // into the top-2 thanks to oversampling, past Heat's weak rating.
        let lookup = ScriptedLookup::new()
            .with_rating("Sudden Death", "tt3", 5.8)
            .with_rating("Heat", "tt1", 2.0)
            .with_rating("Casino", "tt2", 8.2);
        let log = Arc::new(MemoryLookupLog::default());
        let recommender = build_recommender(lookup, log);

        let result = recommender
            .recommend(&genres(&["action"]), 2, true)
            .await
            .unwrap();

        let titles: Vec<_> = result.iter().map(|r| r.candidate.title.as_str()).collect();
        assert_eq!(titles, vec!["Casino (1995)", "Sudden Death (1995)"]);
    }

    #[tokio::test]
    async fn test_oversampling_enriches_more_than_top_n() {
        let lookup = ScriptedLookup::new()
            .with_rating("Heat", "tt1", 8.3)
            .with_rating("Casino", "tt2", 8.2);
        let log = Arc::new(MemoryLookupLog::default());
        let recommender = build_recommender(lookup, log.clone());

        let result = recommender
            .recommend(&genres(&["crime"]), 2, true)
            .await
            .unwrap();

        assert_eq!(result.len(), 2);
        // 2x oversampling: four candidates went through enrichment
        assert_eq!(log.len(), 4);
    }

    #[tokio::test]
    async fn test_top_n_clamps_to_catalog_size() {
        let log = Arc::new(MemoryLookupLog::default());
        let recommender = build_recommender(ScriptedLookup::failing(), log);

        let result = recommender
            .recommend(&genres(&["action"]), 10, true)
            .await
            .unwrap();

        assert_eq!(result.len(), 4, "four-entry catalog caps the list at four");
    }

    // ============================================================================
    // Graceful degradation
    // ============================================================================

    #[tokio::test]
    async fn test_all_lookup_failures_still_yield_full_list() {
        let log = Arc::new(MemoryLookupLog::default());
        let recommender = build_recommender(ScriptedLookup::failing(), log.clone());

        let result = recommender
            .recommend(&genres(&["action", "crime"]), 3, true)
            .await
            .unwrap();

        assert_eq!(result.len(), 3);
        for record in &result {
            assert!(!record.lookup_succeeded);
            assert_eq!(record.description, NO_DESCRIPTION);
            assert!(record.rating.is_none());
        }

        // All ratings tie at 0.0, so matcher order survives the rerank
        assert_eq!(result[0].candidate.title, "Heat (1995)");
        assert!(!log.is_empty(), "failures are visible in the log");
        assert!(log.snapshot().iter().all(|e| !e.succeeded()));
    }

    #[tokio::test]
    async fn test_partial_failure_degrades_only_affected_candidates() {
        // Casino resolves; the others have no scripted entry and miss
        let lookup = ScriptedLookup::new().with_rating("Casino", "tt2", 8.2);
        let log = Arc::new(MemoryLookupLog::default());
        let recommender = build_recommender(lookup, log);

        let result = recommender
            .recommend(&genres(&["action", "crime"]), 3, true)
            .await
            .unwrap();

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].candidate.title, "Casino (1995)");
        assert!(result[0].lookup_succeeded);
        assert!(result[1..].iter().all(|r| !r.lookup_succeeded));
    }

    // ============================================================================
    // Enrichment disabled
    // ============================================================================

    #[tokio::test]
    async fn test_enrichment_disabled_preserves_matcher_order() {
        // Ratings exist but must never be fetched in similarity-only mode
        let lookup = ScriptedLookup::new()
            .with_rating("Heat", "tt1", 1.0)
            .with_rating("Sudden Death", "tt3", 9.9);
        let log = Arc::new(MemoryLookupLog::default());
        let recommender = build_recommender(lookup, log.clone());

        let result = recommender
            .recommend(&genres(&["action", "crime"]), 3, false)
            .await
            .unwrap();

        let titles: Vec<_> = result.iter().map(|r| r.candidate.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Heat (1995)", "Sudden Death (1995)", "Casino (1995)"]
        );
        assert!(result.iter().all(|r| !r.lookup_succeeded));
        assert!(log.is_empty(), "similarity-only mode makes no lookups");
    }

    // ============================================================================
    // Concurrency and cancellation
    // ============================================================================

    #[tokio::test]
    async fn test_sequential_fan_out_gives_same_result() {
        let lookup = ScriptedLookup::new()
            .with_rating("Heat", "tt1", 8.3)
            .with_rating("Casino", "tt2", 8.2);
        let log = Arc::new(MemoryLookupLog::default());
        let recommender = build_recommender(lookup, log).with_fan_out(1);

        let result = recommender
            .recommend(&genres(&["crime"]), 2, true)
            .await
            .unwrap();

        let titles: Vec<_> = result.iter().map(|r| r.candidate.title.as_str()).collect();
        assert_eq!(titles, vec!["Heat (1995)", "Casino (1995)"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_request_aborts_inflight_lookups() {
        let mut lookup = ScriptedLookup::new().with_rating("Heat", "tt1", 8.3);
        lookup.delay = Some(Duration::from_secs(600));
        let log = Arc::new(MemoryLookupLog::default());
        let recommender = build_recommender(lookup, log.clone());

        // The caller gives up long before any lookup can finish; dropping
        // the future must abandon the in-flight tasks cleanly.
        let outcome = tokio::time::timeout(
            Duration::from_millis(50),
            recommender.recommend(&genres(&["action", "crime"]), 2, true),
        )
        .await;

        assert!(outcome.is_err(), "request was cancelled");
        // Yield so aborted tasks get torn down before we inspect the log
        tokio::task::yield_now().await;
        assert!(
            log.snapshot().iter().all(|e| !e.succeeded()),
            "a cancelled request never produces successful lookups"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_lookup_degrades_instead_of_stalling() {
        // Scripted delay far beyond the enricher budget: every candidate
        // times out but the request itself completes.
        let mut lookup = ScriptedLookup::new().with_rating("Heat", "tt1", 8.3);
        lookup.delay = Some(Duration::from_secs(600));
        let log = Arc::new(MemoryLookupLog::default());
        let enricher = Enricher::new(Arc::new(lookup), log.clone())
            .with_lookup_timeout(Duration::from_secs(2));
        let recommender = Recommender::new(build_test_catalog(), enricher);

        let result = recommender
            .recommend(&genres(&["action", "crime"]), 2, true)
            .await
            .unwrap();

        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|r| !r.lookup_succeeded));
        assert_eq!(result[0].candidate.title, "Heat (1995)");
        assert_eq!(result[0].description, NO_DESCRIPTION);
    }
}
