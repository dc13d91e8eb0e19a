// Domain-driven module structure for the access log ingester.

// Core infrastructure
pub mod filter;
pub mod parser;
pub mod state;

// Domain modules
pub mod aggregate;
pub mod store;
pub mod query;
pub mod conf;
pub mod runtime;
