//! Observability log for lookup attempts.
//!
//! The sink is injected into the enricher, so the core keeps no global
//! mutable state and tests can assert on exactly what was recorded.
//! Appends may come from concurrent enrichment tasks; implementations
//! must serialize them.

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

/// Default number of entries the in-memory sink retains
pub const DEFAULT_RETENTION: usize = 100;

/// Outcome of one lookup attempt: the key extracted fields, or a short
/// failure reason.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Enriched {
        rating: Option<f32>,
        has_poster: bool,
    },
    Failed {
        reason: String,
    },
}

/// One record of a lookup attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupLogEntry {
    pub title: String,
    pub outcome: LookupOutcome,
}

impl LookupLogEntry {
    pub fn enriched(title: impl Into<String>, rating: Option<f32>, has_poster: bool) -> Self {
        Self {
            title: title.into(),
            outcome: LookupOutcome::Enriched { rating, has_poster },
        }
    }

    pub fn failed(title: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            outcome: LookupOutcome::Failed {
                reason: reason.into(),
            },
        }
    }

    pub fn succeeded(&self) -> bool {
        matches!(self.outcome, LookupOutcome::Enriched { .. })
    }
}

/// Append-only sink for lookup records.
pub trait LookupLog: Send + Sync {
    fn append(&self, entry: LookupLogEntry);
}

/// In-memory ring buffer keeping the most recent `capacity` entries.
pub struct MemoryLookupLog {
    capacity: usize,
    entries: Mutex<VecDeque<LookupLogEntry>>,
}

impl MemoryLookupLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// Copy of the retained entries, oldest first.
    pub fn snapshot(&self) -> Vec<LookupLogEntry> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryLookupLog {
    fn default() -> Self {
        Self::new(DEFAULT_RETENTION)
    }
}

impl LookupLog for MemoryLookupLog {
    fn append(&self, entry: LookupLogEntry) {
        if self.capacity == 0 {
            return;
        }
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
    }
}
