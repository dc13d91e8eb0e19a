//! Store trait: the boundary between the core and persistence.
//!
//! The core hands the store normalized records and query descriptions;
//! filtering, sorting and grouped reduction are executed on the store side.
//! `memory.rs` provides the in-process implementation.

use serde::{Deserialize, Serialize};

use crate::aggregate::{AggregationSpec, GroupResult};
use crate::filter::TimeWindow;
use crate::parser::{NormalizedRecord, RecordField};

use super::error::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindFilter {
    /// Equality on one text field
    Equals(RecordField, String),
    /// Record datetime inside a half-open window
    Within(TimeWindow),
}

/// Filter, project to one field, sort by the projected value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindQuery {
    pub filter: FindFilter,
    pub projection: RecordField,
    pub direction: SortDirection,
}

impl FindQuery {
    pub fn equals(field: RecordField, value: impl Into<String>, projection: RecordField) -> Self {
        Self {
            filter: FindFilter::Equals(field, value.into()),
            projection,
            direction: SortDirection::Descending,
        }
    }

    pub fn within(window: TimeWindow, projection: RecordField) -> Self {
        Self {
            filter: FindFilter::Within(window),
            projection,
            direction: SortDirection::Descending,
        }
    }

    pub fn matches(&self, record: &NormalizedRecord) -> bool {
        match &self.filter {
            FindFilter::Equals(field, value) => field.value_of(record) == value,
            FindFilter::Within(window) => window.contains(&record.datetime()),
        }
    }
}

/// Synchronous store interface. Each call succeeds or fails as a whole;
/// retry and timeout policy belong to the caller.
#[cfg_attr(test, mockall::automock)]
pub trait RecordStore: Send + Sync {
    fn insert(&self, record: NormalizedRecord) -> Result<(), StoreError>;

    /// Projected values of every matching record (duplicates kept), sorted.
    fn find(&self, query: &FindQuery) -> Result<Vec<String>, StoreError>;

    fn group_reduce(&self, spec: &AggregationSpec) -> Result<Vec<GroupResult>, StoreError>;

    fn record_count(&self) -> Result<usize, StoreError>;
}
