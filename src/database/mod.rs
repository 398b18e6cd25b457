//! Database module
//!
//! This module handles database connections and the Postgres attribute table

pub mod connection;
pub mod repositories;

pub use connection::{create_pool, health_check, DatabasePool};
pub use repositories::PostgresAttributeStore;
