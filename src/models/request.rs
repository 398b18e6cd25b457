//! Inbound request envelope

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Request envelope posted by the voice platform
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub session: Option<Session>,
    #[serde(default)]
    pub context: Option<Context>,
    pub request: Request,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub new: bool,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub attributes: Option<Map<String, Value>>,
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Context {
    #[serde(rename = "System", default)]
    pub system: Option<SystemContext>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SystemContext {
    #[serde(default)]
    pub user: Option<User>,
}

/// The request body proper; which fields are present depends on `type`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    #[serde(rename = "type")]
    pub request_type: String,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub intent: Option<Intent>,
    #[serde(default)]
    pub cause: Option<ConnectionCause>,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Intent {
    pub name: String,
}

/// Outcome of a commerce connection, carried by `SessionResumedRequest`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ConnectionCause {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub status: Option<ConnectionStatus>,
    #[serde(default)]
    pub result: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ConnectionStatus {
    #[serde(default, deserialize_with = "string_or_number")]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl RequestEnvelope {
    /// User identity used as the durable-attribute key
    pub fn user_id(&self) -> Option<&str> {
        self.context
            .as_ref()
            .and_then(|c| c.system.as_ref())
            .and_then(|s| s.user.as_ref())
            .or_else(|| self.session.as_ref().and_then(|s| s.user.as_ref()))
            .map(|u| u.user_id.as_str())
            .filter(|id| !id.is_empty())
    }

    /// Request locale, if the platform sent one
    pub fn locale(&self) -> Option<&str> {
        self.request.locale.as_deref()
    }

    /// True on the first request of a session
    pub fn is_new_session(&self) -> bool {
        self.session.as_ref().map_or(false, |s| s.new)
    }

    /// Session attributes echoed back by the platform
    pub fn session_attributes(&self) -> Option<&Map<String, Value>> {
        self.session.as_ref().and_then(|s| s.attributes.as_ref())
    }
}

impl ConnectionCause {
    /// Status code as sent; the platform uses strings but numbers are accepted
    pub fn status_code(&self) -> Option<&str> {
        self.status.as_ref().and_then(|s| s.code.as_deref())
    }

    /// Error payload, ignoring `null` and empty objects
    pub fn error_payload(&self) -> Option<&Value> {
        self.result.as_ref().filter(|payload| match payload {
            Value::Null => false,
            Value::Object(map) => !map.is_empty(),
            Value::String(s) => !s.is_empty(),
            _ => true,
        })
    }

    /// `code` field of the error payload
    pub fn error_code(&self) -> Option<&str> {
        self.error_payload()
            .and_then(|payload| payload.get("code"))
            .and_then(Value::as_str)
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_intent_request() {
        let envelope: RequestEnvelope = serde_json::from_value(json!({
            "version": "1.0",
            "session": {
                "new": true,
                "sessionId": "amzn1.echo-api.session.1",
                "user": { "userId": "session-user" }
            },
            "context": { "System": { "user": { "userId": "amzn1.ask.account.ABC" } } },
            "request": {
                "type": "IntentRequest",
                "requestId": "req-1",
                "locale": "en-GB",
                "intent": { "name": "AddToCartIntent", "confirmationStatus": "NONE" }
            }
        }))
        .unwrap();

        assert_eq!(envelope.user_id(), Some("amzn1.ask.account.ABC"));
        assert_eq!(envelope.locale(), Some("en-GB"));
        assert!(envelope.is_new_session());
        assert_eq!(envelope.request.intent.unwrap().name, "AddToCartIntent");
    }

    #[test]
    fn test_user_id_falls_back_to_session() {
        let envelope: RequestEnvelope = serde_json::from_value(json!({
            "session": { "new": false, "user": { "userId": "session-user" } },
            "request": { "type": "LaunchRequest" }
        }))
        .unwrap();
        assert_eq!(envelope.user_id(), Some("session-user"));
        assert!(!envelope.is_new_session());
    }

    #[test]
    fn test_connection_cause_numeric_code() {
        let cause: ConnectionCause = serde_json::from_value(json!({
            "token": "AddToShoppingCartToken",
            "status": { "code": 200, "message": "OK" }
        }))
        .unwrap();
        assert_eq!(cause.status_code(), Some("200"));
        assert!(cause.error_payload().is_none());
    }

    #[test]
    fn test_empty_payload_is_not_an_error() {
        let cause: ConnectionCause = serde_json::from_value(json!({
            "token": "PurchaseProductToken",
            "status": { "code": "200" },
            "result": {}
        }))
        .unwrap();
        assert!(cause.error_payload().is_none());

        let cause: ConnectionCause = serde_json::from_value(json!({
            "status": { "code": "200" },
            "result": { "code": "AlexaShopping.RetryLaterError", "message": "later" }
        }))
        .unwrap();
        assert_eq!(cause.error_code(), Some("AlexaShopping.RetryLaterError"));
    }
}
