//! Error handling for the skill
//!
//! This module defines the error type shared by the request pipeline,
//! the persistence adapters and the configuration layer.

use thiserror::Error;

/// Main error type for the skill
#[derive(Error, Debug)]
pub enum SkillError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Request carries no user id")]
    MissingUserId,
}

/// Result type alias for skill operations
pub type Result<T> = std::result::Result<T, SkillError>;

impl SkillError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            SkillError::Database(_) => true,
            SkillError::Redis(_) => true,
            SkillError::Io(_) => true,
            SkillError::Storage(_) => true,
            SkillError::Serialization(_) => false,
            SkillError::Config(_) => false,
            SkillError::InvalidRequest(_) => false,
            SkillError::MissingUserId => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SkillError::Config(_) => ErrorSeverity::Critical,
            SkillError::Database(_) | SkillError::Redis(_) | SkillError::Storage(_) => {
                ErrorSeverity::Error
            }
            SkillError::InvalidRequest(_) | SkillError::MissingUserId => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }
}

impl From<config::ConfigError> for SkillError {
    fn from(err: config::ConfigError) -> Self {
        SkillError::Config(err.to_string())
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
