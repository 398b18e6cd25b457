//! Database repositories module
//!
//! This module contains repository implementations for data access

pub mod attributes;

pub use attributes::PostgresAttributeStore;
