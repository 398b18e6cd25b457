//! Postgres attribute store

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use sqlx::PgPool;
use tracing::{debug, info};

use crate::config::validation::validate_table_name;
use crate::state::attributes::SessionAttributes;
use crate::state::storage::AttributeStore;
use crate::utils::errors::{Result, SkillError};
use crate::utils::logging::log_store_operation;

/// One JSONB attribute record per user in a configurable table
#[derive(Clone, Debug)]
pub struct PostgresAttributeStore {
    pool: PgPool,
    table_name: String,
}

impl PostgresAttributeStore {
    /// Wrap a pool; the table name must be a plain identifier
    pub fn new(pool: PgPool, table_name: impl Into<String>) -> Result<Self> {
        let table_name = table_name.into();
        validate_table_name(&table_name)?;
        Ok(Self { pool, table_name })
    }

    /// Create the attribute table if it does not exist yet
    pub async fn ensure_table(&self) -> Result<()> {
        let statement = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                user_id TEXT PRIMARY KEY,
                attributes JSONB NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL
            )
            "#,
            self.table_name
        );

        sqlx::query(&statement).execute(&self.pool).await?;
        info!(table = %self.table_name, "Attribute table ready");
        Ok(())
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

#[async_trait]
impl AttributeStore for PostgresAttributeStore {
    async fn load(&self, user_id: &str) -> Result<Option<SessionAttributes>> {
        debug!(user_id = user_id, table = %self.table_name, "Loading attributes from Postgres");

        let query = format!("SELECT attributes FROM {} WHERE user_id = $1", self.table_name);
        let row: Option<(Value,)> = sqlx::query_as(&query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                log_store_operation(self.name(), "load", user_id, false);
                SkillError::from(e)
            })?;

        let attributes = match row {
            Some((Value::Object(map),)) => Some(SessionAttributes::from_map(map)?),
            Some((other,)) => {
                return Err(SkillError::Storage(format!(
                    "Stored attributes for {} are not an object: {}",
                    user_id, other
                )))
            }
            None => None,
        };

        log_store_operation(self.name(), "load", user_id, true);
        Ok(attributes)
    }

    async fn save(&self, user_id: &str, attributes: &SessionAttributes) -> Result<()> {
        let map = attributes.to_map()?;
        let query = format!(
            r#"
            INSERT INTO {} (user_id, attributes, updated_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id) DO UPDATE
            SET attributes = EXCLUDED.attributes,
                updated_at = EXCLUDED.updated_at
            "#,
            self.table_name
        );

        sqlx::query(&query)
            .bind(user_id)
            .bind(Value::Object(map))
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                log_store_operation(self.name(), "save", user_id, false);
                SkillError::from(e)
            })?;

        log_store_operation(self.name(), "save", user_id, true);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "postgres"
    }
}
