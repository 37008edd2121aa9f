//! Best-effort metadata enrichment for one candidate title.
//!
//! The enricher normalizes the title, searches the external service, takes
//! the rank-1 hit as the canonical match, and fetches its details. The
//! whole sequence runs under a per-title timeout, and every attempt is
//! recorded in the injected observability sink. A failed lookup returns a
//! typed error for the caller's degrade policy; it never aborts anything.

use crate::error::LookupError;
use crate::log::{LookupLog, LookupLogEntry};
use crate::lookup::{TitleDetails, TitleLookup};
use crate::normalize::normalize_title;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, instrument};

/// Sentinel description used when a lookup fails or the service has no
/// plot text for a match.
pub const NO_DESCRIPTION: &str = "No description found.";

/// Default per-title lookup budget
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(4);

/// Fields extracted from a successful lookup.
#[derive(Debug, Clone)]
pub struct EnrichedFields {
    pub description: String,
    pub poster_url: Option<String>,
    pub rating: Option<f32>,
    pub source_link: Option<String>,
}

impl EnrichedFields {
    /// Description priority: plot outline, else full plot, else synopsis,
    /// else the sentinel. Blank text at one level falls through to the
    /// next. Poster, rating, and link pass through when present.
    pub fn from_details(details: TitleDetails) -> Self {
        let description = [details.plot_outline, details.plot, details.synopsis]
            .into_iter()
            .flatten()
            .find(|text| !text.trim().is_empty())
            .unwrap_or_else(|| NO_DESCRIPTION.to_string());

        Self {
            description,
            poster_url: details.cover_url,
            rating: details.rating,
            source_link: details.source_url,
        }
    }
}

/// Runs the search-then-details sequence for one title.
pub struct Enricher {
    lookup: Arc<dyn TitleLookup>,
    log: Arc<dyn LookupLog>,
    lookup_timeout: Duration,
}

impl Enricher {
    pub fn new(lookup: Arc<dyn TitleLookup>, log: Arc<dyn LookupLog>) -> Self {
        Self {
            lookup,
            log,
            lookup_timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Configure the per-title lookup budget (default: 4s)
    pub fn with_lookup_timeout(mut self, lookup_timeout: Duration) -> Self {
        self.lookup_timeout = lookup_timeout;
        self
    }

    /// One best-effort enrichment attempt.
    ///
    /// A slow lookup is cut off at the configured budget and reported as
    /// `LookupError::Timeout`, identical to any other lookup failure.
    #[instrument(skip(self))]
    pub async fn enrich(&self, title: &str) -> Result<EnrichedFields, LookupError> {
        let outcome = match timeout(self.lookup_timeout, self.enrich_inner(title)).await {
            Ok(result) => result,
            Err(_) => Err(LookupError::Timeout {
                seconds: self.lookup_timeout.as_secs(),
            }),
        };

        match &outcome {
            Ok(fields) => {
                debug!(rating = ?fields.rating, "title enriched");
                self.log.append(LookupLogEntry::enriched(
                    title,
                    fields.rating,
                    fields.poster_url.is_some(),
                ));
            }
            Err(err) => {
                debug!(error = %err, "title lookup failed");
                self.log
                    .append(LookupLogEntry::failed(title, err.short_message()));
            }
        }

        outcome
    }

    async fn enrich_inner(&self, title: &str) -> Result<EnrichedFields, LookupError> {
        let query = normalize_title(title);
        let matches = self.lookup.search(&query).await?;

        // Rank-1 selection: the first hit is taken as the canonical match,
        // with no further disambiguation.
        let best = match matches.into_iter().next() {
            Some(hit) => hit,
            None => return Err(LookupError::NoMatch { query }),
        };

        debug!(match_id = %best.id, matched = %best.title, "search hit");
        let details = self.lookup.details(&best.id).await?;
        Ok(EnrichedFields::from_details(details))
    }
}
