use std::sync::atomic::{AtomicU64, Ordering};
use serde::Serialize;

use super::model::ValidationError;

/// Keeps a counter group on its own cache line so concurrent ingest
/// threads don't invalidate each other when bumping different groups.
#[repr(align(64))]
#[derive(Debug, Default)]
pub struct CacheAligned<T>(pub T);

/// Outcome counters for normalization (updated per input line)
#[derive(Debug, Default)]
pub struct OutcomeMetrics {
    pub accepted: AtomicU64,
    pub wrong_arity: AtomicU64,
    pub unclassifiable: AtomicU64,
    pub malformed_datetime: AtomicU64,
}

/// Query counters
#[derive(Debug, Default)]
pub struct QueryMetrics {
    pub lookups: AtomicU64,
    pub aggregations: AtomicU64,
    pub store_failures: AtomicU64,
}

/// Ingest and query counters.
///
/// All operations use `Ordering::Relaxed`; `snapshot()` is not atomic across
/// fields, which is fine for observability.
#[derive(Debug, Default)]
pub struct IngestMetrics {
    pub outcomes: CacheAligned<OutcomeMetrics>,
    pub queries: CacheAligned<QueryMetrics>,
}

impl IngestMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn record_accepted(&self) {
        self.outcomes.0.accepted.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_rejected(&self, error: &ValidationError) {
        let counter = match error {
            ValidationError::WrongArity { .. } => &self.outcomes.0.wrong_arity,
            ValidationError::UnclassifiableToken(_) => &self.outcomes.0.unclassifiable,
            ValidationError::MalformedDateTime(_) => &self.outcomes.0.malformed_datetime,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_lookup(&self) {
        self.queries.0.lookups.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_aggregation(&self) {
        self.queries.0.aggregations.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_store_failure(&self) {
        self.queries.0.store_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let outcomes = &self.outcomes.0;
        let queries = &self.queries.0;
        let wrong_arity = outcomes.wrong_arity.load(Ordering::Relaxed);
        let unclassifiable = outcomes.unclassifiable.load(Ordering::Relaxed);
        let malformed_datetime = outcomes.malformed_datetime.load(Ordering::Relaxed);

        MetricsSnapshot {
            accepted: outcomes.accepted.load(Ordering::Relaxed),
            rejected: wrong_arity + unclassifiable + malformed_datetime,
            wrong_arity,
            unclassifiable,
            malformed_datetime,
            lookups: queries.lookups.load(Ordering::Relaxed),
            aggregations: queries.aggregations.load(Ordering::Relaxed),
            store_failures: queries.store_failures.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub accepted: u64,
    pub rejected: u64,
    pub wrong_arity: u64,
    pub unclassifiable: u64,
    pub malformed_datetime: u64,
    pub lookups: u64,
    pub aggregations: u64,
    pub store_failures: u64,
}
