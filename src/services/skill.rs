//! Skill turn pipeline
//!
//! One request envelope in, one response envelope out: log the request,
//! load attributes, bind the translator, dispatch, log the response.

use serde_json::Map;
use tracing::instrument;

use crate::handlers::common::error_response;
use crate::handlers::{parse_intent, Dispatcher, TurnContext};
use crate::i18n::I18n;
use crate::middleware::{load_attributes, LoggingMiddleware};
use crate::models::request::RequestEnvelope;
use crate::models::response::ResponseEnvelope;
use crate::state::storage::SharedAttributeStore;

/// Shared, immutable skill state plus the store handle
pub struct SkillService {
    i18n: I18n,
    store: SharedAttributeStore,
    dispatcher: Dispatcher,
    logging: LoggingMiddleware,
}

impl SkillService {
    pub fn new(i18n: I18n, store: SharedAttributeStore) -> Self {
        Self {
            i18n,
            store,
            dispatcher: Dispatcher::default(),
            logging: LoggingMiddleware::default(),
        }
    }

    /// Handle one turn. Never fails: errors become the apology response.
    #[instrument(skip_all, fields(request_type = %envelope.request.request_type))]
    pub async fn handle(&self, envelope: &RequestEnvelope) -> ResponseEnvelope {
        let timer = self.logging.log_request(envelope);

        let locale = envelope.locale().unwrap_or(self.i18n.default_locale());
        let translator = self.i18n.translator(locale);
        let intent = parse_intent(envelope);

        let response = match load_attributes(envelope, self.store.as_ref()).await {
            Ok(attributes) => {
                let mut ctx = TurnContext::new(
                    envelope,
                    intent,
                    translator,
                    attributes,
                    self.store.as_ref(),
                );
                let builder = self.dispatcher.dispatch(&mut ctx).await;

                match ctx.attributes.to_map() {
                    Ok(session_attributes) => builder.build(session_attributes),
                    Err(err) => error_response(&ctx.translator, &err).build(Map::new()),
                }
            }
            Err(err) => {
                let session_attributes = envelope.session_attributes().cloned().unwrap_or_default();
                error_response(&translator, &err).build(session_attributes)
            }
        };

        self.logging.log_response(&response, timer);
        response
    }

    pub fn store(&self) -> &SharedAttributeStore {
        &self.store
    }

    pub fn i18n(&self) -> &I18n {
        &self.i18n
    }
}

impl std::fmt::Debug for SkillService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkillService")
            .field("store", &self.store.name())
            .field("dispatcher", &self.dispatcher)
            .finish_non_exhaustive()
    }
}
