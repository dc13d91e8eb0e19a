use std::cmp::Ordering;

use serde::Serialize;

/// Accumulated value of one group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GroupValue {
    Count(u64),
    Duration(f64),
    CountAndDuration { count: u64, duration: f64 },
}

impl GroupValue {
    /// Natural (ascending) order of two values of the same kind.
    fn rank(&self, other: &GroupValue) -> Ordering {
        match (self, other) {
            (GroupValue::Count(a), GroupValue::Count(b)) => a.cmp(b),
            (GroupValue::Duration(a), GroupValue::Duration(b)) => a.total_cmp(b),
            (
                GroupValue::CountAndDuration { count: ac, duration: ad },
                GroupValue::CountAndDuration { count: bc, duration: bd },
            ) => ac.cmp(bc).then_with(|| ad.total_cmp(bd)),
            _ => Ordering::Equal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupResult {
    pub key: String,
    pub value: GroupValue,
}

impl GroupResult {
    pub fn new(key: impl Into<String>, value: GroupValue) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    /// Output order: value descending, then key ascending.
    pub fn output_order(a: &GroupResult, b: &GroupResult) -> Ordering {
        b.value.rank(&a.value).then_with(|| a.key.cmp(&b.key))
    }
}
