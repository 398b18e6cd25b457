//! Shopping flow handlers
//!
//! Offers put the conversation into the Cart or Buy state; a yes hands the
//! recorded item to the platform through a connection directive, and the
//! platform reports back with a session-resumed request.

use tracing::{debug, info, warn};

use super::common::fallback;
use super::context::TurnContext;
use crate::models::catalog::{offer_for, FEATURED_PRODUCT};
use crate::models::request::ConnectionCause;
use crate::models::response::{ResponseBuilder, SessionContinuation, ShoppingAction};
use crate::state::attributes::SkillState;
use crate::utils::errors::{Result, SkillError};
use crate::utils::logging::log_connection_result;

/// Error code the platform uses when the shopping service asks to retry
pub const RETRY_LATER_CODE: &str = "AlexaShopping.RetryLaterError";

const SUCCESS_STATUS: &str = "200";

/// Offer the featured product for `action` and wait for yes/no
pub async fn handle_offer(ctx: &mut TurnContext<'_>, action: ShoppingAction) -> Result<ResponseBuilder> {
    let item = offer_for(FEATURED_PRODUCT, ctx.locale()).ok_or_else(|| {
        SkillError::Config(format!("Product {} missing from catalog", FEATURED_PRODUCT))
    })?;

    let key = match action {
        ShoppingAction::AddToCart => "CART_ITEM",
        ShoppingAction::Buy => "BUY_ITEM",
    };
    let prompt = ctx.translator.t_with(key, &[("title", item.title.as_str())]);

    debug!(asin = %item.asin, locale = ctx.translator.locale(), action = ?action, "Offering item");
    ctx.attributes.offer(action, item);

    Ok(ResponseBuilder::new().speak(prompt.clone()).reprompt(prompt))
}

/// Accept the pending offer
pub async fn handle_yes(ctx: &mut TurnContext<'_>) -> Result<ResponseBuilder> {
    let previous = ctx.attributes.return_to_menu();

    match (previous.pending_action(), previous.item()) {
        (Some(action), Some(item)) => {
            info!(asin = %item.asin, token = action.token(), "Starting shopping connection");
            Ok(ResponseBuilder::new()
                .speak("")
                .add_directive(action.directive(item))
                .with_continuation(SessionContinuation::PlatformDecides))
        }
        _ => Ok(fallback(ctx)),
    }
}

/// Decline the pending offer
pub async fn handle_no(ctx: &mut TurnContext<'_>) -> Result<ResponseBuilder> {
    let key = match ctx.attributes.return_to_menu() {
        SkillState::Cart(_) => "CART_DECLINE",
        SkillState::Buy(_) => "BUY_DECLINE",
        SkillState::Menu => return Ok(fallback(ctx)),
    };

    Ok(ResponseBuilder::new()
        .speak(ctx.with_main_menu(&ctx.translator.t(key)))
        .reprompt(ctx.translator.t("MAIN_MENU")))
}

/// Report the result of a shopping connection and return to the menu
pub async fn handle_session_resumed(ctx: &mut TurnContext<'_>) -> Result<ResponseBuilder> {
    let previous = ctx.attributes.return_to_menu();
    let outcome = ConnectionOutcome::classify(ctx.envelope.request.cause.as_ref(), &previous);
    debug!(outcome = ?outcome, previous_state = %previous, "Shopping connection classified");

    let text = ctx.translator.t(outcome.message_key());
    Ok(ResponseBuilder::new()
        .speak(ctx.with_main_menu(&text))
        .reprompt(ctx.translator.t("MAIN_MENU")))
}

pub async fn handle_refund(ctx: &mut TurnContext<'_>) -> Result<ResponseBuilder> {
    Ok(ResponseBuilder::new()
        .speak(ctx.with_main_menu(&ctx.translator.t("REFUND")))
        .reprompt(ctx.translator.t("MAIN_MENU")))
}

/// How a shopping connection ended, as far as the user is told
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionOutcome {
    Success(ShoppingAction),
    Failure(ShoppingAction),
    RetryLater,
    /// No usable cause or token
    Unknown,
}

impl ConnectionOutcome {
    /// Classify a connection result. Error payloads are checked before the
    /// token, so a retry-later code wins in every state.
    pub fn classify(cause: Option<&ConnectionCause>, previous: &SkillState) -> Self {
        let cause = match cause {
            Some(cause) => cause,
            None => {
                warn!("Session resumed without a cause");
                return ConnectionOutcome::Unknown;
            }
        };

        let token = cause.token.as_deref();
        log_connection_result(token, cause.status_code(), cause.error_code());

        // Failure wording follows the offer that was pending; without one the
        // outstanding token decides.
        let failed_action = previous.pending_action().unwrap_or(match token {
            Some(token) if ShoppingAction::from_token(token) == Some(ShoppingAction::Buy) => {
                ShoppingAction::Buy
            }
            _ => ShoppingAction::AddToCart,
        });

        if cause.status_code() != Some(SUCCESS_STATUS) {
            return ConnectionOutcome::Failure(failed_action);
        }

        if cause.error_payload().is_some() {
            return if cause.error_code() == Some(RETRY_LATER_CODE) {
                ConnectionOutcome::RetryLater
            } else {
                ConnectionOutcome::Failure(failed_action)
            };
        }

        match token.and_then(ShoppingAction::from_token) {
            Some(action) => ConnectionOutcome::Success(action),
            None => ConnectionOutcome::Unknown,
        }
    }

    /// Translation key of the sentence reporting this outcome
    pub fn message_key(self) -> &'static str {
        match self {
            ConnectionOutcome::Success(ShoppingAction::AddToCart) => "CART_SUCCESS",
            ConnectionOutcome::Success(ShoppingAction::Buy) => "BUY_SUCCESS",
            ConnectionOutcome::Failure(ShoppingAction::AddToCart) => "CART_FAIL",
            ConnectionOutcome::Failure(ShoppingAction::Buy) => "BUY_FAIL",
            ConnectionOutcome::RetryLater => "RETRY_TRANSITION",
            ConnectionOutcome::Unknown => "ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::OfferedItem;
    use serde_json::json;

    fn cause(value: serde_json::Value) -> ConnectionCause {
        serde_json::from_value(value).unwrap()
    }

    fn mat() -> OfferedItem {
        OfferedItem {
            title: "Yoga Mat".to_string(),
            asin: "B01LP0U5X0".to_string(),
        }
    }

    #[test]
    fn test_success_by_token() {
        let cart = cause(json!({ "token": "AddToShoppingCartToken", "status": { "code": "200" } }));
        assert_eq!(
            ConnectionOutcome::classify(Some(&cart), &SkillState::Menu),
            ConnectionOutcome::Success(ShoppingAction::AddToCart)
        );

        let buy = cause(json!({ "token": "PurchaseProductToken", "status": { "code": "200" }, "result": null }));
        assert_eq!(
            ConnectionOutcome::classify(Some(&buy), &SkillState::Cart(mat())),
            ConnectionOutcome::Success(ShoppingAction::Buy)
        );
    }

    #[test]
    fn test_retry_later_wins_in_every_state() {
        let retry = cause(json!({
            "token": "PurchaseProductToken",
            "status": { "code": "200" },
            "result": { "code": RETRY_LATER_CODE, "message": "try later" }
        }));
        for state in [SkillState::Menu, SkillState::Cart(mat()), SkillState::Buy(mat())] {
            assert_eq!(
                ConnectionOutcome::classify(Some(&retry), &state),
                ConnectionOutcome::RetryLater
            );
        }
    }

    #[test]
    fn test_failure_wording_follows_pending_offer() {
        let failed = cause(json!({ "token": "AddToShoppingCartToken", "status": { "code": "500" } }));
        assert_eq!(
            ConnectionOutcome::classify(Some(&failed), &SkillState::Buy(mat())).message_key(),
            "BUY_FAIL"
        );
        assert_eq!(
            ConnectionOutcome::classify(Some(&failed), &SkillState::Cart(mat())).message_key(),
            "CART_FAIL"
        );
    }

    #[test]
    fn test_failure_in_menu_uses_token() {
        let failed = cause(json!({
            "token": "PurchaseProductToken",
            "status": { "code": "200" },
            "result": { "code": "AlexaShopping.UnknownError" }
        }));
        assert_eq!(
            ConnectionOutcome::classify(Some(&failed), &SkillState::Menu),
            ConnectionOutcome::Failure(ShoppingAction::Buy)
        );

        let failed = cause(json!({ "status": { "code": 400 } }));
        assert_eq!(
            ConnectionOutcome::classify(Some(&failed), &SkillState::Menu),
            ConnectionOutcome::Failure(ShoppingAction::AddToCart)
        );
    }

    #[test]
    fn test_missing_cause_or_token() {
        assert_eq!(
            ConnectionOutcome::classify(None, &SkillState::Menu).message_key(),
            "ERROR"
        );
        let unknown = cause(json!({ "token": "SomethingElse", "status": { "code": "200" } }));
        assert_eq!(
            ConnectionOutcome::classify(Some(&unknown), &SkillState::Menu),
            ConnectionOutcome::Unknown
        );
    }
}
