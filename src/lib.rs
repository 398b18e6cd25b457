//! Daily Yoga shopping skill
//!
//! Webhook backend for a voice-assistant skill that offers yoga products
//! and hands purchases and cart additions to the platform's shopping
//! connections. This library provides the request pipeline, the Menu/Cart/Buy
//! state machine, localized responses and the durable attribute stores.

pub mod config;
pub mod database;
pub mod handlers;
pub mod i18n;
pub mod middleware;
pub mod models;
pub mod server;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{Result, SkillError};

// Re-export main components for easy access
pub use i18n::I18n;
pub use services::SkillService;
pub use state::{AttributeStore, SessionAttributes, SkillState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
