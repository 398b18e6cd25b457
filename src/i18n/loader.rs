//! Translation loader and i18n management
//!
//! This module provides the translation lookup used by every response:
//! per-locale JSON string tables, `{placeholder}` substitution, random
//! selection among phrasing variants and fallback to the default locale.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use serde_json::{Map, Value};
use tokio::fs;
use tracing::{debug, error, info, warn};

use crate::config::I18nConfig;
use crate::utils::errors::{Result, SkillError};

/// Main internationalization manager
#[derive(Debug, Clone)]
pub struct I18n {
    /// Loaded translations by locale code
    translations: HashMap<String, Map<String, Value>>,
    /// Default locale code
    default_locale: String,
    /// Supported locale codes
    supported_locales: Vec<String>,
    /// Directory holding `<locale>.json` files
    translations_dir: PathBuf,
}

/// Translation parameters for message formatting
pub type TranslationParams = HashMap<String, String>;

impl I18n {
    /// Create a new I18n instance
    pub fn new(config: &I18nConfig) -> Self {
        Self {
            translations: HashMap::new(),
            default_locale: config.default_locale.clone(),
            supported_locales: config.supported_locales.clone(),
            translations_dir: PathBuf::from(&config.translations_dir),
        }
    }

    /// Load all translation files from the translations directory
    pub async fn load_translations(&mut self) -> Result<()> {
        let translations_dir = self.translations_dir.clone();

        if !translations_dir.exists() {
            return Err(SkillError::Config(format!(
                "Translations directory not found: {}",
                translations_dir.display()
            )));
        }

        let supported_locales = self.supported_locales.clone();
        for locale in &supported_locales {
            let file_path = translations_dir.join(format!("{}.json", locale));

            if file_path.exists() {
                match self.load_locale_file(&file_path, locale).await {
                    Ok(_) => info!("Loaded translations for locale: {}", locale),
                    Err(e) => {
                        error!("Failed to load translations for {}: {}", locale, e);
                        if locale == &self.default_locale {
                            return Err(SkillError::Config(format!(
                                "Failed to load default locale translations: {}",
                                e
                            )));
                        }
                    }
                }
            } else {
                warn!("Translation file not found: {}", file_path.display());
                if locale == &self.default_locale {
                    return Err(SkillError::Config(format!(
                        "Default locale translation file not found: {}",
                        file_path.display()
                    )));
                }
            }
        }

        Ok(())
    }

    /// Load a single locale file
    async fn load_locale_file(&mut self, file_path: &Path, locale: &str) -> Result<()> {
        let content = fs::read_to_string(file_path).await?;
        self.insert_locale_json(locale, &content)
    }

    /// Register a locale table from its JSON source
    pub fn insert_locale_json(&mut self, locale: &str, content: &str) -> Result<()> {
        match serde_json::from_str::<Value>(content)? {
            Value::Object(map) => {
                debug!("Loaded {} translation keys for {}", map.len(), locale);
                self.translations.insert(locale.to_string(), map);
                Ok(())
            }
            _ => Err(SkillError::Config(format!(
                "Invalid translation file format for {}",
                locale
            ))),
        }
    }

    /// Get a translated message
    pub fn t(&self, key: &str, locale: &str, params: Option<&TranslationParams>) -> String {
        let effective_locale = self.effective_locale(locale);

        let value = self
            .translation_value(key, effective_locale)
            .or_else(|| self.translation_value(key, &self.default_locale));

        match value {
            Some(value) => {
                let text = self.extract_text_from_value(value);
                self.format_message(&text, params)
            }
            None => {
                warn!("Translation key '{}' not found for locale '{}'", key, locale);
                key.to_string()
            }
        }
    }

    /// Bind a locale, producing the per-turn translator
    pub fn translator(&self, locale: &str) -> Translator<'_> {
        Translator {
            i18n: self,
            locale: self.effective_locale(locale).to_string(),
        }
    }

    /// Check if a locale is supported
    pub fn is_locale_supported(&self, locale: &str) -> bool {
        self.supported_locales.iter().any(|l| l == locale)
    }

    /// The locale a request is served in: the requested one when loaded,
    /// otherwise the default
    fn effective_locale<'a>(&'a self, locale: &'a str) -> &'a str {
        if self.is_locale_supported(locale) && self.translations.contains_key(locale) {
            locale
        } else {
            &self.default_locale
        }
    }

    /// Get translation value from nested JSON structure
    fn translation_value(&self, key: &str, locale: &str) -> Option<&Value> {
        let translations = self.translations.get(locale)?;

        let mut keys = key.split('.');
        let mut current = translations.get(keys.next()?)?;
        for k in keys {
            current = current.get(k)?;
        }

        Some(current)
    }

    /// Extract text from JSON value; arrays hold interchangeable phrasings
    fn extract_text_from_value(&self, value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            Value::Array(variants) => variants
                .choose(&mut rand::thread_rng())
                .map(|variant| self.extract_text_from_value(variant))
                .unwrap_or_default(),
            _ => value.to_string(),
        }
    }

    /// Format message with parameters
    fn format_message(&self, template: &str, params: Option<&TranslationParams>) -> String {
        if let Some(params) = params {
            let mut result = template.to_string();
            for (key, value) in params {
                let placeholder = format!("{{{}}}", key);
                result = result.replace(&placeholder, value);
            }
            result
        } else {
            template.to_string()
        }
    }

    /// Get supported locales
    pub fn supported_locales(&self) -> &[String] {
        &self.supported_locales
    }

    /// Get default locale
    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

}

/// Locale-bound view over [`I18n`], created once per turn
#[derive(Debug, Clone)]
pub struct Translator<'a> {
    i18n: &'a I18n,
    locale: String,
}

impl<'a> Translator<'a> {
    /// Translate a key in the bound locale
    pub fn t(&self, key: &str) -> String {
        self.i18n.t(key, &self.locale, None)
    }

    /// Translate a key and substitute `{name}` placeholders
    pub fn t_with(&self, key: &str, params: &[(&str, &str)]) -> String {
        let params: TranslationParams = params
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.i18n.t(key, &self.locale, Some(&params))
    }

    /// The locale strings are served in
    pub fn locale(&self) -> &str {
        &self.locale
    }
}
