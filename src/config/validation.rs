//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use regex::Regex;

use super::settings::PersistenceBackend;
use super::Settings;
use crate::utils::errors::{Result, SkillError};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_server_config(&settings.server)?;
    validate_persistence_config(settings)?;
    validate_i18n_config(&settings.i18n)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate webhook server configuration
fn validate_server_config(config: &super::ServerConfig) -> Result<()> {
    if config.host.is_empty() {
        return Err(SkillError::Config("Server host is required".to_string()));
    }

    if config.port == 0 {
        return Err(SkillError::Config(
            "Server port must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate the persistence backend and the connection settings it needs
fn validate_persistence_config(settings: &Settings) -> Result<()> {
    match settings.persistence.backend() {
        Some(PersistenceBackend::Postgres { table_name }) => {
            validate_table_name(&table_name)?;
            validate_database_config(&settings.database)
        }
        Some(PersistenceBackend::Redis { .. }) => validate_redis_config(&settings.redis),
        None => Err(SkillError::Config(
            "Either persistence.table_name or persistence.bucket is required".to_string(),
        )),
    }
}

/// Table names are spliced into SQL, so only plain identifiers are accepted
pub fn validate_table_name(table_name: &str) -> Result<()> {
    let pattern = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]{0,62}$")
        .map_err(|e| SkillError::Config(format!("Invalid table name pattern: {}", e)))?;

    if !pattern.is_match(table_name) {
        return Err(SkillError::Config(format!(
            "Invalid table name: {}. Use letters, digits and underscores only",
            table_name
        )));
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(SkillError::Config("Database URL is required".to_string()));
    }

    if config.max_connections == 0 {
        return Err(SkillError::Config(
            "Max connections must be greater than 0".to_string(),
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(SkillError::Config(
            "Min connections cannot be greater than max connections".to_string(),
        ));
    }

    Ok(())
}

/// Validate Redis configuration
fn validate_redis_config(config: &super::RedisConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(SkillError::Config("Redis URL is required".to_string()));
    }

    Ok(())
}

/// Validate internationalization configuration
fn validate_i18n_config(config: &super::I18nConfig) -> Result<()> {
    if config.default_locale.is_empty() {
        return Err(SkillError::Config("Default locale is required".to_string()));
    }

    if config.supported_locales.is_empty() {
        return Err(SkillError::Config(
            "At least one supported locale is required".to_string(),
        ));
    }

    if !config.supported_locales.contains(&config.default_locale) {
        return Err(SkillError::Config(
            "Default locale must be in supported locales list".to_string(),
        ));
    }

    if config.translations_dir.is_empty() {
        return Err(SkillError::Config(
            "Translations directory is required".to_string(),
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(SkillError::Config("Log level is required".to_string()));
    }

    tracing_subscriber::EnvFilter::try_new(&config.level).map_err(|e| {
        SkillError::Config(format!("Invalid log filter {}: {}", config.level, e))
    })?;

    Ok(())
}
