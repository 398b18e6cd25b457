//! Middleware module
//!
//! This module contains the interceptors run around every turn

pub mod logging;
pub mod user_data;

// Re-export commonly used middleware
pub use logging::{LoggingMiddleware, TurnTimer};
pub use user_data::load_attributes;
