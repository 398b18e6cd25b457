//! Services module
//!
//! This module contains the skill pipeline and the factory for the
//! configured attribute store

pub mod skill;

pub use skill::SkillService;

use std::sync::Arc;

use tracing::info;

use crate::config::{PersistenceBackend, Settings};
use crate::database::{create_pool, PostgresAttributeStore};
use crate::state::storage::{RedisAttributeStore, SharedAttributeStore};
use crate::utils::errors::{Result, SkillError};

/// Connect the attribute store selected by the persistence settings
pub async fn build_attribute_store(settings: &Settings) -> Result<SharedAttributeStore> {
    match settings.persistence.backend() {
        Some(PersistenceBackend::Postgres { table_name }) => {
            info!(table = %table_name, "Using Postgres attribute store");
            let pool = create_pool(&settings.database).await?;
            let store = PostgresAttributeStore::new(pool, table_name)?;
            store.ensure_table().await?;
            Ok(Arc::new(store))
        }
        Some(PersistenceBackend::Redis { bucket }) => {
            info!(bucket = %bucket, "Using Redis attribute store");
            let store = RedisAttributeStore::new(&settings.redis, bucket).await?;
            store.health_check().await?;
            Ok(Arc::new(store))
        }
        None => Err(SkillError::Config(
            "No persistence backend configured".to_string(),
        )),
    }
}
