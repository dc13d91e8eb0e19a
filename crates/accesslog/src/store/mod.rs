//! Store module: persistence boundary and the in-memory store.

pub mod error;
pub mod memory;
pub mod ops;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use ops::{FindFilter, FindQuery, RecordStore, SortDirection};
