//! Window: half-open time ranges over record timestamps.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Time window `[start, end)`.
///
/// A record participates when `start <= datetime < end`. A window whose
/// start is not before its end is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeWindow {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn contains(&self, at: &NaiveDateTime) -> bool {
        self.start <= *at && *at < self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}
