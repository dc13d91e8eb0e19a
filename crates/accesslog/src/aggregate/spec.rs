use serde::{Deserialize, Serialize};

use crate::filter::TimeWindow;
use crate::parser::{NormalizedRecord, RecordField};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accumulator {
    /// Number of records per group
    Count,
    /// Sum of durations per group
    DurationSum,
    /// Both, ranked by count then duration
    CountAndDuration,
}

impl Accumulator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Accumulator::Count => "count",
            Accumulator::DurationSum => "duration",
            Accumulator::CountAndDuration => "count_duration",
        }
    }
}

/// One grouped query: key, accumulator and an optional `[t1, t2)` window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationSpec {
    pub key: RecordField,
    pub accumulator: Accumulator,
    pub window: Option<TimeWindow>,
}

impl AggregationSpec {
    pub fn new(key: RecordField, accumulator: Accumulator) -> Self {
        Self {
            key,
            accumulator,
            window: None,
        }
    }

    pub fn within(mut self, window: TimeWindow) -> Self {
        self.window = Some(window);
        self
    }

    pub fn count_by_url() -> Self {
        Self::new(RecordField::Url, Accumulator::Count)
    }

    pub fn duration_by_url() -> Self {
        Self::new(RecordField::Url, Accumulator::DurationSum)
    }

    pub fn count_and_duration_by_ip() -> Self {
        Self::new(RecordField::Ip, Accumulator::CountAndDuration)
    }

    pub fn count_by_url_in_range(window: TimeWindow) -> Self {
        Self::count_by_url().within(window)
    }

    /// Whether a record takes part in this query.
    #[inline]
    pub fn includes(&self, record: &NormalizedRecord) -> bool {
        self.window
            .as_ref()
            .map_or(true, |w| w.contains(&record.datetime()))
    }

    /// Name a store may keep the materialized result under,
    /// e.g. `urls_count`, `ips_count_duration`, `urls_count_date`.
    pub fn collection_name(&self) -> String {
        let suffix = if self.window.is_some() { "_date" } else { "" };
        format!("{}s_{}{}", self.key.as_str(), self.accumulator.as_str(), suffix)
    }
}
