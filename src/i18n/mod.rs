//! Internationalization module
//!
//! This module handles locale support for spoken responses.
//! It provides translation loading, locale fallback, placeholder
//! substitution and random selection among phrasing variants.

pub mod loader;

// Re-export commonly used i18n components
pub use loader::{I18n, TranslationParams, Translator};
