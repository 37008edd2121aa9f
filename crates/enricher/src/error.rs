//! Error types for metadata lookup.

use thiserror::Error;

/// Errors from one best-effort lookup attempt.
///
/// None of these are fatal to a recommendation request: the orchestrator
/// absorbs them and degrades the affected candidate to sentinel fields.
#[derive(Error, Debug)]
pub enum LookupError {
    /// Network-level failure talking to the lookup service
    #[error("lookup request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("lookup service returned status {status}")]
    Status { status: u16 },

    /// The search returned no results for the normalized query
    #[error("no match found for {query:?}")]
    NoMatch { query: String },

    /// The payload could not be interpreted
    #[error("malformed lookup response: {0}")]
    Malformed(String),

    /// The per-title budget elapsed before the lookup finished
    #[error("lookup timed out after {seconds}s")]
    Timeout { seconds: u64 },
}

impl LookupError {
    /// Short single-line form for the observability log. Log entries carry
    /// a readable reason, never a full error chain.
    pub fn short_message(&self) -> String {
        self.to_string().chars().take(160).collect()
    }
}
