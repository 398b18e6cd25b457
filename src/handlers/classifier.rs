//! Intent classification

use crate::models::request::RequestEnvelope;

pub const INTENT_REQUEST: &str = "IntentRequest";

pub const LAUNCH_REQUEST: &str = "LaunchRequest";
pub const SESSION_RESUMED_REQUEST: &str = "SessionResumedRequest";
pub const SESSION_ENDED_REQUEST: &str = "SessionEndedRequest";

pub const CANCEL_INTENT: &str = "AMAZON.CancelIntent";
pub const STOP_INTENT: &str = "AMAZON.StopIntent";
pub const YES_INTENT: &str = "AMAZON.YesIntent";
pub const NO_INTENT: &str = "AMAZON.NoIntent";
pub const HELP_INTENT: &str = "AMAZON.HelpIntent";
pub const BUY_ITEM_INTENT: &str = "BuyItemIntent";
pub const ADD_TO_CART_INTENT: &str = "AddToCartIntent";
pub const REFUND_INTENT: &str = "RefundIntent";

/// Canonical intent name of a request: the nested intent name for intent
/// requests, the request type for everything else
pub fn parse_intent(envelope: &RequestEnvelope) -> &str {
    let request = &envelope.request;
    if request.request_type == INTENT_REQUEST {
        if let Some(intent) = &request.intent {
            return &intent.name;
        }
    }
    &request.request_type
}
