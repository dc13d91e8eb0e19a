pub use super::model::{FieldCategory, NormalizedRecord, RecordField, Timestamp, ValidationError};

pub trait FieldMatcher: Send + Sync {
    /// true when the whole (already trimmed) token has this category's shape
    fn matches(&self, token: &str) -> bool;
    fn category(&self) -> FieldCategory;
}
