//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the skill.

use std::path::Path;

use tracing::{debug, error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use crate::config::LoggingConfig;
use crate::utils::errors::{Result, SkillError};

/// Initialize logging based on configuration.
///
/// The returned guard flushes the file writer and must be held for the
/// lifetime of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = tracing_subscriber::EnvFilter::try_new(&config.level)
        .map_err(|e| SkillError::Config(format!("Invalid log filter: {}", e)))?;

    let stdout_layer = if config.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stdout)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stdout)
            .boxed()
    };

    let (file_layer, guard) = match config.file_path.as_deref() {
        Some(file_path) => {
            let path = Path::new(file_path);
            let directory = path.parent().unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or("daily-yoga-skill.log");

            let file_appender = tracing_appender::rolling::daily(directory, file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking)
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| SkillError::Config(format!("Failed to install subscriber: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log a handled turn with structured data
pub fn log_turn(user_id: &str, intent: &str, state: &str, handler: &str) {
    info!(
        user_id = user_id,
        intent = intent,
        state = state,
        handler = handler,
        "Turn dispatched"
    );
}

/// Log a commerce connection result returned by the platform
pub fn log_connection_result(token: Option<&str>, code: Option<&str>, payload_code: Option<&str>) {
    info!(
        token = token,
        status_code = code,
        payload_code = payload_code,
        "Shopping connection result received"
    );
}

/// Log durable attribute operations
pub fn log_store_operation(store: &str, operation: &str, user_id: &str, success: bool) {
    if success {
        debug!(
            store = store,
            operation = operation,
            user_id = user_id,
            "Attribute store operation completed"
        );
    } else {
        error!(
            store = store,
            operation = operation,
            user_id = user_id,
            "Attribute store operation failed"
        );
    }
}
