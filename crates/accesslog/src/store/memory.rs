//! Memory: in-process [`RecordStore`].
//!
//! Records live in a `Vec` behind a read/write lock: lookups and grouped
//! reductions take the read side and may run concurrently, inserts take the
//! write side. A reduction sees the records inserted before it acquired the
//! lock. Optionally keeps each reduction's output under its collection name.

use dashmap::DashMap;
use parking_lot::RwLock;

use crate::aggregate::{self, AggregationSpec, GroupResult};
use crate::conf::StoreConfig;
use crate::parser::NormalizedRecord;

use super::error::StoreError;
use super::ops::{FindQuery, RecordStore, SortDirection};

pub struct MemoryStore {
    records: RwLock<Vec<NormalizedRecord>>,
    materialized: DashMap<String, Vec<GroupResult>>,
    config: StoreConfig,
}

impl MemoryStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            materialized: DashMap::new(),
            config,
        }
    }

    /// Last materialized output stored under `name` (e.g. `urls_count`).
    pub fn materialized(&self, name: &str) -> Option<Vec<GroupResult>> {
        self.materialized.get(name).map(|entry| entry.value().clone())
    }

    pub fn materialized_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.materialized.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

impl RecordStore for MemoryStore {
    fn insert(&self, record: NormalizedRecord) -> Result<(), StoreError> {
        let mut records = self.records.write();
        if let Some(limit) = self.config.max_records {
            if records.len() >= limit {
                return Err(StoreError::CapacityExceeded(limit));
            }
        }
        records.push(record);
        Ok(())
    }

    fn find(&self, query: &FindQuery) -> Result<Vec<String>, StoreError> {
        let mut values: Vec<String> = {
            let records = self.records.read();
            records
                .iter()
                .filter(|r| query.matches(r))
                .map(|r| query.projection.value_of(r).to_string())
                .collect()
        };

        match query.direction {
            SortDirection::Ascending => values.sort(),
            SortDirection::Descending => values.sort_by(|a, b| b.cmp(a)),
        }
        Ok(values)
    }

    fn group_reduce(&self, spec: &AggregationSpec) -> Result<Vec<GroupResult>, StoreError> {
        let results = {
            let records = self.records.read();
            aggregate::aggregate(records.iter(), spec)
        };

        if self.config.materialize_results {
            self.materialized.insert(spec.collection_name(), results.clone());
        }
        Ok(results)
    }

    fn record_count(&self) -> Result<usize, StoreError> {
        Ok(self.records.read().len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::GroupValue;
    use crate::filter::TimeWindow;
    use crate::parser::{RecordField, Timestamp};
    use chrono::NaiveDate;

    fn at(day: u32) -> Timestamp {
        NaiveDate::from_ymd_opt(2017, 11, day).unwrap().and_hms_opt(0, 0, 0).unwrap()
    }

    fn seeded(config: StoreConfig) -> MemoryStore {
        let store = MemoryStore::new(config);
        for (ip, url, duration, day) in [
            ("123.23.13.2", "a.com/x", 1.0, 1),
            ("123.23.13.2", "b.com/y", 2.0, 2),
            ("223.23.13.2", "a.com/x", 4.0, 3),
        ] {
            store.insert(NormalizedRecord::new(ip, url, duration, at(day))).unwrap();
        }
        store
    }

    #[test]
    fn test_find_equals_projects_and_sorts_descending() {
        let store = seeded(StoreConfig::default());
        let ips = store
            .find(&FindQuery::equals(RecordField::Url, "a.com/x", RecordField::Ip))
            .unwrap();
        assert_eq!(ips, vec!["223.23.13.2", "123.23.13.2"]);
    }

    #[test]
    fn test_find_keeps_duplicates() {
        let store = seeded(StoreConfig::default());
        store.insert(NormalizedRecord::new("123.23.13.2", "a.com/x", 1.0, at(4))).unwrap();
        let urls = store
            .find(&FindQuery::equals(RecordField::Ip, "123.23.13.2", RecordField::Url))
            .unwrap();
        assert_eq!(urls, vec!["b.com/y", "a.com/x", "a.com/x"]);
    }

    #[test]
    fn test_find_within_window() {
        let store = seeded(StoreConfig::default());
        let urls = store
            .find(&FindQuery::within(TimeWindow::new(at(2), at(3)), RecordField::Url))
            .unwrap();
        assert_eq!(urls, vec!["b.com/y"]);
    }

    #[test]
    fn test_find_ascending() {
        let store = seeded(StoreConfig::default());
        let mut query = FindQuery::within(TimeWindow::new(at(1), at(30)), RecordField::Url);
        query.direction = SortDirection::Ascending;
        assert_eq!(store.find(&query).unwrap(), vec!["a.com/x", "a.com/x", "b.com/y"]);
    }

    #[test]
    fn test_capacity_limit() {
        let store = seeded(StoreConfig {
            max_records: Some(3),
            ..Default::default()
        });
        let err = store
            .insert(NormalizedRecord::new("1.1.1.1", "c.com", 1.0, at(5)))
            .unwrap_err();
        assert_eq!(err, StoreError::CapacityExceeded(3));
        assert_eq!(store.record_count().unwrap(), 3);
    }

    #[test]
    fn test_group_reduce_materializes_when_enabled() {
        let store = seeded(StoreConfig {
            materialize_results: true,
            ..Default::default()
        });
        let results = store.group_reduce(&AggregationSpec::count_by_url()).unwrap();
        assert_eq!(results[0], GroupResult::new("a.com/x", GroupValue::Count(2)));
        assert_eq!(store.materialized("urls_count"), Some(results));
        assert_eq!(store.materialized_names(), vec!["urls_count"]);
    }

    #[test]
    fn test_group_reduce_replaces_materialized_result() {
        let store = seeded(StoreConfig {
            materialize_results: true,
            ..Default::default()
        });
        store.group_reduce(&AggregationSpec::count_by_url()).unwrap();
        store.insert(NormalizedRecord::new("9.9.9.9", "b.com/y", 1.0, at(6))).unwrap();
        store.insert(NormalizedRecord::new("9.9.9.9", "b.com/y", 1.0, at(7))).unwrap();
        store.group_reduce(&AggregationSpec::count_by_url()).unwrap();

        let cached = store.materialized("urls_count").unwrap();
        assert_eq!(cached[0], GroupResult::new("b.com/y", GroupValue::Count(3)));
    }

    #[test]
    fn test_group_reduce_not_materialized_by_default() {
        let store = seeded(StoreConfig::default());
        store.group_reduce(&AggregationSpec::duration_by_url()).unwrap();
        assert!(store.materialized("urls_duration").is_none());
    }

    #[test]
    fn test_concurrent_inserts_and_reductions() {
        let store = std::sync::Arc::new(MemoryStore::default());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let store = std::sync::Arc::clone(&store);
                std::thread::spawn(move || {
                    for n in 0..50 {
                        let url = format!("site{}.com", n % 5);
                        store
                            .insert(NormalizedRecord::new(format!("10.0.0.{}", i), url, 1.0, at(1)))
                            .unwrap();
                        store.group_reduce(&AggregationSpec::count_by_url()).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.record_count().unwrap(), 200);
        let results = store.group_reduce(&AggregationSpec::count_by_url()).unwrap();
        assert_eq!(results.len(), 5);
        assert!(results.iter().all(|r| r.value == GroupValue::Count(40)));
    }
}
