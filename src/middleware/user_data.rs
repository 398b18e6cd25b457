//! Attribute loading interceptor
//!
//! A new session starts from the durable copy, an ongoing one from the
//! attributes the platform echoes back.

use tracing::{debug, info};

use crate::models::request::RequestEnvelope;
use crate::state::attributes::SessionAttributes;
use crate::state::storage::AttributeStore;
use crate::utils::errors::{Result, SkillError};

/// Attributes this turn starts from
pub async fn load_attributes(
    envelope: &RequestEnvelope,
    store: &dyn AttributeStore,
) -> Result<SessionAttributes> {
    if !envelope.is_new_session() {
        let attributes = envelope
            .session_attributes()
            .cloned()
            .map(SessionAttributes::from_map)
            .transpose()?
            .unwrap_or_default();
        debug!(state = %attributes.state, "Using session attributes");
        return Ok(attributes);
    }

    let user_id = envelope.user_id().ok_or(SkillError::MissingUserId)?;
    match store.load(user_id).await? {
        Some(attributes) => {
            debug!(user_id = user_id, store = store.name(), "Loaded durable attributes");
            Ok(attributes)
        }
        None => {
            info!(user_id = user_id, "First session for user");
            Ok(SessionAttributes::new_user())
        }
    }
}
