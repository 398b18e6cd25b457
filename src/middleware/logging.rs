//! Request and response logging interceptors
//!
//! Envelopes are logged around every turn: bodies at debug level, the
//! summary and timing at info.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::models::request::RequestEnvelope;
use crate::models::response::ResponseEnvelope;

/// Logging interceptor for skill turns
#[derive(Debug, Clone)]
pub struct LoggingMiddleware {
    log_envelopes: bool,
    slow_turn_ms: u128,
}

impl LoggingMiddleware {
    pub fn new(log_envelopes: bool, slow_turn_ms: u128) -> Self {
        Self {
            log_envelopes,
            slow_turn_ms,
        }
    }

    /// Log an incoming envelope and start timing the turn
    pub fn log_request(&self, envelope: &RequestEnvelope) -> TurnTimer {
        let request = &envelope.request;
        info!(
            request_type = %request.request_type,
            request_id = request.request_id.as_deref(),
            locale = envelope.locale(),
            new_session = envelope.is_new_session(),
            "Skill request received"
        );

        if self.log_envelopes {
            match serde_json::to_string(envelope) {
                Ok(body) => debug!(body = %body, "Request envelope"),
                Err(e) => warn!(error = %e, "Could not serialize request envelope for logging"),
            }
        }

        TurnTimer {
            started: Instant::now(),
            slow_turn_ms: self.slow_turn_ms,
        }
    }

    /// Log the outgoing envelope and the turn duration
    pub fn log_response(&self, response: &ResponseEnvelope, timer: TurnTimer) {
        let duration_ms = timer.started.elapsed().as_millis();
        info!(
            directives = response.response.directives.len(),
            should_end_session = response.response.should_end_session,
            duration_ms = duration_ms,
            "Skill response sent"
        );

        if duration_ms > timer.slow_turn_ms {
            warn!(duration_ms = duration_ms, "Slow turn detected");
        }

        if self.log_envelopes {
            match serde_json::to_string(response) {
                Ok(body) => debug!(body = %body, "Response envelope"),
                Err(e) => warn!(error = %e, "Could not serialize response envelope for logging"),
            }
        }
    }
}

impl Default for LoggingMiddleware {
    fn default() -> Self {
        Self::new(true, 1000)
    }
}

/// Start time of a turn, handed from request to response logging
#[derive(Debug)]
pub struct TurnTimer {
    started: Instant,
    slow_turn_ms: u128,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::response::ResponseBuilder;
    use serde_json::json;

    #[test]
    fn test_logging_middleware_creation() {
        let middleware = LoggingMiddleware::new(false, 250);
        assert!(!middleware.log_envelopes);
        assert_eq!(middleware.slow_turn_ms, 250);

        let middleware = LoggingMiddleware::default();
        assert!(middleware.log_envelopes);
    }

    #[test]
    fn test_request_and_response_logging() {
        let middleware = LoggingMiddleware::default();
        let envelope: RequestEnvelope =
            serde_json::from_value(json!({ "request": { "type": "LaunchRequest" } })).unwrap();

        let timer = middleware.log_request(&envelope);
        let response = ResponseBuilder::new().speak("Hi").build(Default::default());
        middleware.log_response(&response, timer);
    }
}
