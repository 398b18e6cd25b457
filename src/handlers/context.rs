//! Per-turn handler context

use crate::i18n::Translator;
use crate::models::request::RequestEnvelope;
use crate::state::attributes::SessionAttributes;
use crate::state::storage::AttributeStore;
use crate::utils::errors::{Result, SkillError};

/// Everything a route needs for one turn. The turn owns its attribute copy;
/// the durable store is only touched through [`TurnContext::persist`].
pub struct TurnContext<'a> {
    pub envelope: &'a RequestEnvelope,
    pub intent: &'a str,
    pub translator: Translator<'a>,
    pub attributes: SessionAttributes,
    store: &'a dyn AttributeStore,
}

impl<'a> TurnContext<'a> {
    pub fn new(
        envelope: &'a RequestEnvelope,
        intent: &'a str,
        translator: Translator<'a>,
        attributes: SessionAttributes,
        store: &'a dyn AttributeStore,
    ) -> Self {
        Self {
            envelope,
            intent,
            translator,
            attributes,
            store,
        }
    }

    /// Request locale, if any
    pub fn locale(&self) -> Option<&str> {
        self.envelope.locale()
    }

    pub fn user_id(&self) -> Result<&str> {
        self.envelope.user_id().ok_or(SkillError::MissingUserId)
    }

    /// Write the current attributes to durable storage
    pub async fn persist(&self) -> Result<()> {
        let user_id = self.user_id()?;
        self.store.save(user_id, &self.attributes).await
    }

    /// `text` followed by the main menu prompt
    pub fn with_main_menu(&self, text: &str) -> String {
        format!("{} {}", text, self.translator.t("MAIN_MENU"))
    }
}
