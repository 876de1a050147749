//! Infrastructure Adapters
//!
//! Implementations of domain ports for external systems.

pub mod sql;

// Re-exports
pub use sql::Database;
