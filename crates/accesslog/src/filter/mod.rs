//! Filter module: token pattern matching and time-window predicates.

pub mod engine;
pub mod window;

pub use engine::{FilterError, PatternMatcher};
pub use window::TimeWindow;
