//! Durable attribute storage
//!
//! Attributes that outlive a session are kept per user id behind the
//! [`AttributeStore`] trait. Redis and in-memory implementations live here;
//! the Postgres one lives with the rest of the database code.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use redis::AsyncCommands;
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use tracing::{debug, error};

use super::attributes::SessionAttributes;
use crate::config::RedisConfig;
use crate::utils::errors::{Result, SkillError};
use crate::utils::logging::log_store_operation;

/// Key-value persistence of attribute records, keyed by user id
#[async_trait]
pub trait AttributeStore: Send + Sync {
    /// Load the record for a user; `None` when nothing was ever saved
    async fn load(&self, user_id: &str) -> Result<Option<SessionAttributes>>;

    /// Replace the record for a user
    async fn save(&self, user_id: &str, attributes: &SessionAttributes) -> Result<()>;

    /// Short backend name for logs
    fn name(&self) -> &'static str;
}

/// Shared handle to whichever store is configured
pub type SharedAttributeStore = Arc<dyn AttributeStore>;

/// Redis-backed attribute store; records never expire
#[derive(Clone)]
pub struct RedisAttributeStore {
    connection_manager: redis::aio::ConnectionManager,
    bucket: String,
}

impl RedisAttributeStore {
    /// Connect to Redis and namespace keys under `bucket`
    pub async fn new(config: &RedisConfig, bucket: impl Into<String>) -> Result<Self> {
        let client = redis::Client::open(config.url.as_str())?;
        let connection_manager = redis::aio::ConnectionManager::new(client).await?;

        Ok(Self {
            connection_manager,
            bucket: bucket.into(),
        })
    }

    fn key(&self, user_id: &str) -> String {
        format!("{}:attributes:{}", self.bucket, user_id)
    }

    /// Ping the server
    pub async fn health_check(&self) -> Result<()> {
        let mut conn = self.connection_manager.clone();
        redis::cmd("PING").query_async::<_, String>(&mut conn).await?;
        Ok(())
    }
}

impl std::fmt::Debug for RedisAttributeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisAttributeStore")
            .field("bucket", &self.bucket)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl AttributeStore for RedisAttributeStore {
    async fn load(&self, user_id: &str) -> Result<Option<SessionAttributes>> {
        let key = self.key(user_id);
        debug!(user_id = user_id, key = %key, "Loading attributes from Redis");

        let mut conn = self.connection_manager.clone();
        let serialized: Option<String> = match conn.get(&key).await {
            Ok(data) => data,
            Err(e) => {
                error!(user_id = user_id, error = %e, "Failed to get attributes from Redis");
                log_store_operation(self.name(), "load", user_id, false);
                return Err(e.into());
            }
        };

        let attributes = match serialized {
            Some(data) => {
                let map: Map<String, Value> = serde_json::from_str(&data)?;
                Some(SessionAttributes::from_map(map)?)
            }
            None => {
                debug!(user_id = user_id, "No attributes found in Redis");
                None
            }
        };

        log_store_operation(self.name(), "load", user_id, true);
        Ok(attributes)
    }

    async fn save(&self, user_id: &str, attributes: &SessionAttributes) -> Result<()> {
        let key = self.key(user_id);
        let serialized = serde_json::to_string(&attributes.to_map()?)?;
        debug!(user_id = user_id, key = %key, data_length = serialized.len(), "Saving attributes to Redis");

        let mut conn = self.connection_manager.clone();
        match conn.set::<_, _, ()>(&key, serialized).await {
            Ok(()) => {
                log_store_operation(self.name(), "save", user_id, true);
                Ok(())
            }
            Err(e) => {
                error!(user_id = user_id, error = %e, "Failed to save attributes to Redis");
                log_store_operation(self.name(), "save", user_id, false);
                Err(e.into())
            }
        }
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}

/// Process-local store for tests and local runs
#[derive(Debug, Clone, Default)]
pub struct InMemoryAttributeStore {
    records: Arc<RwLock<HashMap<String, Map<String, Value>>>>,
}

impl InMemoryAttributeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored map for a user
    pub async fn raw(&self, user_id: &str) -> Option<Map<String, Value>> {
        self.records.read().await.get(user_id).cloned()
    }

    /// Seed a raw record
    pub async fn insert_raw(&self, user_id: &str, map: Map<String, Value>) {
        self.records.write().await.insert(user_id.to_string(), map);
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl AttributeStore for InMemoryAttributeStore {
    async fn load(&self, user_id: &str) -> Result<Option<SessionAttributes>> {
        let record = self.records.read().await.get(user_id).cloned();
        record.map(SessionAttributes::from_map).transpose()
    }

    async fn save(&self, user_id: &str, attributes: &SessionAttributes) -> Result<()> {
        if user_id.is_empty() {
            return Err(SkillError::Storage("Cannot save attributes without a user id".to_string()));
        }
        let map = attributes.to_map()?;
        self.records.write().await.insert(user_id.to_string(), map);
        log_store_operation(self.name(), "save", user_id, true);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
