/// Access-line parsing and normalization module
///
/// Turns unordered comma-separated access lines into typed records.
///
/// # Architecture
///
/// - `traits.rs`: matcher trait and re-exported model types
/// - `fields/`: one matcher per field category (IP, duration, datetime, URL)
/// - `classifier.rs`: ordered matcher set, reports every category a token fits
/// - `normalizer.rs`: priority-ordered assignment of tokens to categories
/// - `datetime.rs`: the `YYYY-M-DTh:m:s` grammar
/// - `metrics.rs`: ingest outcome counters

pub mod traits;
pub mod classifier;
pub mod normalizer;
pub mod datetime;
pub mod metrics;
pub mod fields;
pub mod model;

// Re-export commonly used types
pub use classifier::FieldClassifier;
pub use normalizer::RecordNormalizer;
pub use model::{FieldCategory, NormalizedRecord, RecordField, Timestamp, ValidationError};

// Constants
pub const FIELD_COUNT: usize = 4;
pub const FIELD_SEPARATOR: char = ',';
