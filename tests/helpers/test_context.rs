//! Test context for unified test setup
//!
//! Builds a [`SkillService`] over the shipped translations and an
//! in-memory attribute store that tests can inspect afterwards.

use std::sync::{Arc, Once};

use async_trait::async_trait;
use daily_yoga_skill::config::I18nConfig;
use daily_yoga_skill::models::request::RequestEnvelope;
use daily_yoga_skill::models::response::ResponseEnvelope;
use daily_yoga_skill::state::{AttributeStore, InMemoryAttributeStore, SessionAttributes};
use daily_yoga_skill::{I18n, SkillError, SkillService};

static INIT: Once = Once::new();

/// Initialize logging for tests (called once)
pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .try_init();
    });
}

pub fn test_i18n_config() -> I18nConfig {
    I18nConfig {
        default_locale: "en-US".to_string(),
        supported_locales: vec!["en-US".to_string(), "en-GB".to_string()],
        translations_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/translations").to_string(),
    }
}

pub async fn load_i18n() -> I18n {
    let mut i18n = I18n::new(&test_i18n_config());
    i18n.load_translations()
        .await
        .expect("Failed to load translations");
    i18n
}

/// Unified test context around one skill service
pub struct TestContext {
    pub service: Arc<SkillService>,
    pub store: InMemoryAttributeStore,
}

impl TestContext {
    /// Skill backed by an empty in-memory store
    pub async fn new() -> Self {
        init_test_logging();
        let store = InMemoryAttributeStore::new();
        let service = SkillService::new(load_i18n().await, Arc::new(store.clone()));

        Self {
            service: Arc::new(service),
            store,
        }
    }

    /// Skill backed by a custom store; `self.store` is then a detached copy
    pub async fn with_store(store: Arc<dyn AttributeStore>) -> Self {
        init_test_logging();
        let service = SkillService::new(load_i18n().await, store);

        Self {
            service: Arc::new(service),
            store: InMemoryAttributeStore::new(),
        }
    }

    pub async fn handle(&self, envelope: &RequestEnvelope) -> ResponseEnvelope {
        self.service.handle(envelope).await
    }

    /// Translated text in the default locale
    pub fn t(&self, key: &str) -> String {
        self.service.i18n().t(key, "en-US", None)
    }

    pub fn t_in(&self, key: &str, locale: &str) -> String {
        self.service.i18n().t(key, locale, None)
    }

    /// `key` text followed by the main menu prompt
    pub fn with_menu(&self, key: &str) -> String {
        format!("{} {}", self.t(key), self.t("MAIN_MENU"))
    }

    /// Seed a durable record for a returning user
    pub async fn seed_returning_user(&self, user_id: &str) {
        let mut attributes = SessionAttributes::new_user();
        attributes.mark_returning();
        self.store
            .save(user_id, &attributes)
            .await
            .expect("Failed to seed user");
    }
}

/// Which store operation fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailOn {
    Load,
    Save,
}

/// Store whose chosen operation always fails
#[derive(Debug, Clone)]
pub struct FailingStore {
    fail_on: FailOn,
}

impl FailingStore {
    pub fn new(fail_on: FailOn) -> Self {
        Self { fail_on }
    }
}

#[async_trait]
impl AttributeStore for FailingStore {
    async fn load(&self, _user_id: &str) -> daily_yoga_skill::Result<Option<SessionAttributes>> {
        match self.fail_on {
            FailOn::Load => Err(SkillError::Storage("load unavailable".to_string())),
            FailOn::Save => Ok(None),
        }
    }

    async fn save(
        &self,
        _user_id: &str,
        _attributes: &SessionAttributes,
    ) -> daily_yoga_skill::Result<()> {
        match self.fail_on {
            FailOn::Save => Err(SkillError::Storage("save unavailable".to_string())),
            FailOn::Load => Ok(()),
        }
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}
