//! Query module: the operations callers use: ingest, lookups, aggregations.

pub mod error;
pub mod facade;

pub use error::QueryError;
pub use facade::{BatchReport, LogQueries, RejectedLine};
