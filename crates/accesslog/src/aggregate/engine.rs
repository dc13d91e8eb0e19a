//! Map/reduce grouping over normalized records.
//!
//! Every participating record maps to `(key, Tally { 1, duration })`;
//! tallies for a key are summed, then projected onto the accumulator the
//! `AggregationSpec` asks for and sorted. Durations are always summed as `f64`.

use std::collections::HashMap;

use super::result::{GroupResult, GroupValue};
use super::spec::{Accumulator, AggregationSpec};
use crate::parser::NormalizedRecord;

/// Partial reduction for one key.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Tally {
    pub count: u64,
    pub duration: f64,
}

impl Tally {
    pub fn of(record: &NormalizedRecord) -> Self {
        Self {
            count: 1,
            duration: record.duration(),
        }
    }

    pub fn merge(&mut self, other: Tally) {
        self.count += other.count;
        self.duration += other.duration;
    }

    fn project(self, accumulator: Accumulator) -> GroupValue {
        match accumulator {
            Accumulator::Count => GroupValue::Count(self.count),
            Accumulator::DurationSum => GroupValue::Duration(self.duration),
            Accumulator::CountAndDuration => GroupValue::CountAndDuration {
                count: self.count,
                duration: self.duration,
            },
        }
    }
}

/// Group, reduce and order `records` as described by `spec`.
pub fn aggregate<'a, I>(records: I, spec: &AggregationSpec) -> Vec<GroupResult>
where
    I: IntoIterator<Item = &'a NormalizedRecord>,
{
    let mut groups: HashMap<&'a str, Tally> = HashMap::new();

    for record in records.into_iter().filter(|r| spec.includes(r)) {
        groups
            .entry(spec.key.value_of(record))
            .or_default()
            .merge(Tally::of(record));
    }

    let mut results: Vec<GroupResult> = groups
        .into_iter()
        .map(|(key, tally)| GroupResult::new(key, tally.project(spec.accumulator)))
        .collect();
    results.sort_by(GroupResult::output_order);

    tracing::debug!(
        collection = %spec.collection_name(),
        groups = results.len(),
        "aggregation complete"
    );

    results
}
