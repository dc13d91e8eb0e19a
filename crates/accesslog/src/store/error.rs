use thiserror::Error;

/// Failures at the store boundary. Passed through to callers unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Store capacity exceeded: limit is {0} records")]
    CapacityExceeded(usize),
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}
