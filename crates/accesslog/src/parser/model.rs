use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Naive timestamp with second resolution. No timezone is modelled.
pub type Timestamp = NaiveDateTime;

/// Semantic role a token can be assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldCategory {
    /// Dotted-quad client address
    Ip,
    /// Visit duration in seconds
    Duration,
    /// Visit timestamp (`YYYY-M-DTh:m:s`)
    DateTime,
    /// Visited resource
    Url,
}

impl FieldCategory {
    /// Categories in assignment priority order.
    pub const PRIORITY: [FieldCategory; 4] = [
        FieldCategory::Ip,
        FieldCategory::Duration,
        FieldCategory::DateTime,
        FieldCategory::Url,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldCategory::Ip => "ip",
            FieldCategory::Duration => "duration",
            FieldCategory::DateTime => "datetime",
            FieldCategory::Url => "url",
        }
    }

    /// Slot index, matching the position in [`FieldCategory::PRIORITY`].
    pub(crate) fn slot(&self) -> usize {
        match self {
            FieldCategory::Ip => 0,
            FieldCategory::Duration => 1,
            FieldCategory::DateTime => 2,
            FieldCategory::Url => 3,
        }
    }
}

/// Text fields of a record that can be filtered on, grouped by or projected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordField {
    Ip,
    Url,
}

impl RecordField {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordField::Ip => "ip",
            RecordField::Url => "url",
        }
    }

    pub fn value_of<'a>(&self, record: &'a NormalizedRecord) -> &'a str {
        match self {
            RecordField::Ip => record.ip(),
            RecordField::Url => record.url(),
        }
    }
}

/// A fully typed access event.
///
/// Built once by the normalizer (or [`NormalizedRecord::new`]) and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRecord {
    ip: String,
    url: String,
    duration: f64,
    datetime: Timestamp,
}

impl NormalizedRecord {
    pub fn new(ip: impl Into<String>, url: impl Into<String>, duration: f64, datetime: Timestamp) -> Self {
        Self {
            ip: ip.into(),
            url: url.into(),
            duration,
            datetime,
        }
    }

    pub fn ip(&self) -> &str {
        &self.ip
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Visit duration in seconds
    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn datetime(&self) -> Timestamp {
        self.datetime
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("not enough values (expected 4 fields, found {found})")]
    WrongArity { found: usize },

    #[error("incorrect value: {0:?}")]
    UnclassifiableToken(String),

    #[error("malformed datetime: {0:?}")]
    MalformedDateTime(String),
}

impl ValidationError {
    /// Short error kind, used for log fields and counters.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::WrongArity { .. } => "wrong_arity",
            ValidationError::UnclassifiableToken(_) => "unclassifiable_token",
            ValidationError::MalformedDateTime(_) => "malformed_datetime",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_priority_matches_slots() {
        for (i, category) in FieldCategory::PRIORITY.iter().enumerate() {
            assert_eq!(category.slot(), i);
        }
    }

    #[test]
    fn test_record_field_projection() {
        let at = NaiveDate::from_ymd_opt(2017, 3, 2).unwrap().and_hms_opt(21, 22, 7).unwrap();
        let record = NormalizedRecord::new("1.2.3.4", "example.com", 1.5, at);
        assert_eq!(RecordField::Ip.value_of(&record), "1.2.3.4");
        assert_eq!(RecordField::Url.value_of(&record), "example.com");
    }

    #[test]
    fn test_record_serializes_iso_datetime() {
        let at = NaiveDate::from_ymd_opt(2017, 3, 2).unwrap().and_hms_opt(21, 22, 7).unwrap();
        let record = NormalizedRecord::new("1.2.3.4", "example.com", 50.9, at);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["datetime"], "2017-03-02T21:22:07");
        assert_eq!(json["duration"], 50.9);
    }

    #[test]
    fn test_error_messages_keep_legacy_prefixes() {
        let arity = ValidationError::WrongArity { found: 3 };
        assert!(arity.to_string().starts_with("not enough values"));
        let token = ValidationError::UnclassifiableToken("dfhhjhg".into());
        assert!(token.to_string().starts_with("incorrect value"));
        assert_eq!(token.kind(), "unclassifiable_token");
    }
}
