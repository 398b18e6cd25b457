//! Daily Yoga shopping skill
//!
//! Main application entry point

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use daily_yoga_skill::{
    config::Settings,
    i18n::I18n,
    server,
    services::{build_attribute_store, SkillService},
    utils::logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new().context("failed to load settings")?;
    settings.validate()?;

    // Initialize logging; the guard flushes the log file on exit
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", daily_yoga_skill::info());

    // Initialize i18n system
    info!("Loading translations...");
    let mut i18n = I18n::new(&settings.i18n);
    i18n.load_translations().await?;

    // Connect the attribute store
    info!("Connecting attribute store...");
    let store = build_attribute_store(&settings).await?;

    let service = Arc::new(SkillService::new(i18n, store));

    let address = settings.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind to {}", address))?;

    server::serve(listener, service).await?;

    info!("Daily Yoga skill has been shut down.");
    Ok(())
}
