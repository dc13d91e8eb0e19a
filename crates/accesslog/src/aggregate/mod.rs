//! Aggregate module: grouped reductions over normalized records.

pub mod engine;
pub mod result;
pub mod spec;

pub use engine::{aggregate, Tally};
pub use result::{GroupResult, GroupValue};
pub use spec::{Accumulator, AggregationSpec};
