//! Facade: named ingest, lookup and aggregation operations.
//!
//! Normalization happens here; everything touching stored records is
//! composed into a [`FindQuery`] or [`AggregationSpec`] and handed to the
//! store. Store errors are returned as-is inside [`QueryError::Store`].

use std::sync::Arc;

use serde::Serialize;

use crate::aggregate::{AggregationSpec, GroupResult};
use crate::filter::TimeWindow;
use crate::parser::datetime;
use crate::parser::metrics::{IngestMetrics, MetricsSnapshot};
use crate::parser::{NormalizedRecord, RecordField, RecordNormalizer, ValidationError};
use crate::store::{FindQuery, RecordStore};

use super::error::QueryError;

/// Outcome of a multi-line ingest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    pub accepted: usize,
    pub rejected: Vec<RejectedLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedLine {
    /// 1-based line number in the input
    pub line: usize,
    pub kind: &'static str,
    pub message: String,
}

pub struct LogQueries {
    store: Arc<dyn RecordStore>,
    normalizer: RecordNormalizer,
    metrics: Arc<IngestMetrics>,
}

impl LogQueries {
    pub fn new(store: Arc<dyn RecordStore>, normalizer: RecordNormalizer, metrics: Arc<IngestMetrics>) -> Self {
        Self {
            store,
            normalizer,
            metrics,
        }
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    pub fn stats(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    // ── Ingest ──────────────────────────────────────────────────

    /// Normalize one raw line and persist it.
    pub fn insert_log(&self, raw: &str) -> Result<NormalizedRecord, QueryError> {
        let record = self.normalize(raw)?;
        self.with_store(|store| store.insert(record.clone()))?;
        tracing::debug!(ip = record.ip(), url = record.url(), "record inserted");
        Ok(record)
    }

    /// Normalize and insert every non-blank line. Rejected lines are
    /// reported, not fatal; a store failure aborts the batch.
    pub fn ingest_batch<'a, I>(&self, lines: I) -> Result<BatchReport, QueryError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut report = BatchReport {
            accepted: 0,
            rejected: Vec::new(),
        };

        for (index, line) in lines.into_iter().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match self.normalize(line) {
                Ok(record) => {
                    self.with_store(|store| store.insert(record))?;
                    report.accepted += 1;
                }
                Err(error) => report.rejected.push(RejectedLine {
                    line: index + 1,
                    kind: error.kind(),
                    message: error.to_string(),
                }),
            }
        }

        tracing::info!(
            accepted = report.accepted,
            rejected = report.rejected.len(),
            "batch ingest complete"
        );
        Ok(report)
    }

    // ── Point lookups ───────────────────────────────────────────

    pub fn ips_for_url(&self, url: &str) -> Result<Vec<String>, QueryError> {
        self.lookup(FindQuery::equals(RecordField::Url, url, RecordField::Ip))
    }

    pub fn urls_for_ip(&self, ip: &str) -> Result<Vec<String>, QueryError> {
        self.lookup(FindQuery::equals(RecordField::Ip, ip, RecordField::Url))
    }

    /// URLs visited in `[from, to)`.
    pub fn urls_in_range(&self, from: &str, to: &str) -> Result<Vec<String>, QueryError> {
        let window = parse_window(from, to)?;
        self.lookup(FindQuery::within(window, RecordField::Url))
    }

    // ── Aggregations ────────────────────────────────────────────

    pub fn urls_count(&self) -> Result<Vec<GroupResult>, QueryError> {
        self.reduce(AggregationSpec::count_by_url())
    }

    pub fn urls_duration(&self) -> Result<Vec<GroupResult>, QueryError> {
        self.reduce(AggregationSpec::duration_by_url())
    }

    pub fn ips_count_duration(&self) -> Result<Vec<GroupResult>, QueryError> {
        self.reduce(AggregationSpec::count_and_duration_by_ip())
    }

    /// Visit count per URL over records in `[from, to)`.
    pub fn urls_count_in_range(&self, from: &str, to: &str) -> Result<Vec<GroupResult>, QueryError> {
        let window = parse_window(from, to)?;
        self.reduce(AggregationSpec::count_by_url_in_range(window))
    }

    // ── Helpers ─────────────────────────────────────────────────

    fn normalize(&self, raw: &str) -> Result<NormalizedRecord, ValidationError> {
        self.normalizer
            .normalize(raw)
            .inspect(|_| self.metrics.record_accepted())
            .inspect_err(|error| {
                self.metrics.record_rejected(error);
                tracing::debug!(kind = error.kind(), %error, "line rejected");
            })
    }

    fn lookup(&self, query: FindQuery) -> Result<Vec<String>, QueryError> {
        self.metrics.record_lookup();
        self.with_store(|store| store.find(&query))
    }

    fn reduce(&self, spec: AggregationSpec) -> Result<Vec<GroupResult>, QueryError> {
        self.metrics.record_aggregation();
        self.with_store(|store| store.group_reduce(&spec))
    }

    fn with_store<T>(
        &self,
        call: impl FnOnce(&dyn RecordStore) -> Result<T, crate::store::StoreError>,
    ) -> Result<T, QueryError> {
        call(self.store.as_ref()).map_err(|error| {
            self.metrics.record_store_failure();
            tracing::warn!(%error, "store call failed");
            QueryError::Store(error)
        })
    }
}

fn parse_window(from: &str, to: &str) -> Result<TimeWindow, QueryError> {
    Ok(TimeWindow::new(datetime::parse(from)?, datetime::parse(to)?))
}
