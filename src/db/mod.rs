//! Database abstraction layer
//!
//! This module provides a trait-based abstraction over database operations,
//! allowing for multiple database backends and easy testing with mocks.

pub mod adapter;
pub mod postgres;
pub mod types;

// Re-export main types
pub use adapter::{Adapter, connect_adapter};
pub use types::{ColumnRecord, QueryResult};
