//! Request envelope builders

use daily_yoga_skill::models::request::RequestEnvelope;
use daily_yoga_skill::models::response::ResponseEnvelope;
use serde_json::{json, Map, Value};

pub const TEST_USER: &str = "amzn1.ask.account.TEST";

fn build(
    new: bool,
    attributes: Option<&Map<String, Value>>,
    locale: &str,
    mut request: Value,
) -> RequestEnvelope {
    request["locale"] = json!(locale);
    request["requestId"] = json!("amzn1.echo-api.request.test");

    serde_json::from_value(json!({
        "version": "1.0",
        "session": {
            "new": new,
            "sessionId": "amzn1.echo-api.session.test",
            "attributes": attributes.cloned().unwrap_or_default(),
            "user": { "userId": TEST_USER }
        },
        "context": { "System": { "user": { "userId": TEST_USER } } },
        "request": request
    }))
    .expect("Invalid test envelope")
}

/// Launch opening a new session
pub fn launch_request() -> RequestEnvelope {
    build(true, None, "en-US", json!({ "type": "LaunchRequest" }))
}

/// Intent request inside an ongoing session
pub fn intent_request(name: &str, attributes: &Map<String, Value>) -> RequestEnvelope {
    intent_request_in(name, attributes, "en-US")
}

pub fn intent_request_in(
    name: &str,
    attributes: &Map<String, Value>,
    locale: &str,
) -> RequestEnvelope {
    build(
        false,
        Some(attributes),
        locale,
        json!({ "type": "IntentRequest", "intent": { "name": name, "confirmationStatus": "NONE" } }),
    )
}

/// Intent request opening a new session
pub fn new_session_intent(name: &str) -> RequestEnvelope {
    build(
        true,
        None,
        "en-US",
        json!({ "type": "IntentRequest", "intent": { "name": name } }),
    )
}

/// Session-resumed request carrying a connection result
pub fn resumed_request(cause: Option<Value>, attributes: &Map<String, Value>) -> RequestEnvelope {
    let mut request = json!({ "type": "SessionResumedRequest" });
    if let Some(cause) = cause {
        request["cause"] = cause;
    }
    build(false, Some(attributes), "en-US", request)
}

pub fn session_ended_request(attributes: &Map<String, Value>) -> RequestEnvelope {
    build(
        false,
        Some(attributes),
        "en-US",
        json!({ "type": "SessionEndedRequest", "reason": "USER_INITIATED" }),
    )
}

pub fn connection_cause(token: &str, code: Value, result: Value) -> Value {
    json!({
        "type": "ConnectionCompleted",
        "token": token,
        "status": { "code": code, "message": "OK" },
        "result": result
    })
}

/// Session attributes as the platform would echo them
pub fn attributes(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("attributes must be an object"),
    }
}

pub fn cart_attributes() -> Map<String, Value> {
    attributes(json!({
        "SKILL_STATE": "_CART_MODE",
        "NEW_USER": false,
        "SHOPPING_ITEM": { "title": "Yoga Mat", "asin": "B01LP0U5X0" }
    }))
}

pub fn buy_attributes() -> Map<String, Value> {
    attributes(json!({
        "SKILL_STATE": "_BUY_MODE",
        "NEW_USER": false,
        "SHOPPING_ITEM": { "title": "Yoga Mat", "asin": "B01LP0U5X0" }
    }))
}

pub fn menu_attributes() -> Map<String, Value> {
    attributes(json!({ "SKILL_STATE": "_MENU_MODE", "NEW_USER": false }))
}

/// Assert the session carried forward is back at the menu with no item
pub fn assert_menu(response: &ResponseEnvelope) {
    assert_eq!(
        response.session_attributes["SKILL_STATE"],
        json!("_MENU_MODE")
    );
    assert!(!response.session_attributes.contains_key("SHOPPING_ITEM"));
}
