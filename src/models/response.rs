//! Outbound response envelope and the builder handlers compose it with

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::catalog::OfferedItem;

/// Directive type for shopping connections
pub const START_CONNECTION: &str = "Connections.StartConnection";

/// Response envelope returned to the voice platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub version: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub session_attributes: Map<String, Value>,
    pub response: Response,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub directives: Vec<Directive>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub should_end_session: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSpeech {
    #[serde(rename = "type")]
    pub speech_type: String,
    pub ssml: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

/// Commerce hand-off to the platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Directive {
    #[serde(rename = "type")]
    pub directive_type: String,
    pub uri: String,
    pub input: DirectiveInput,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectiveInput {
    pub products: Vec<ProductReference>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductReference {
    pub asin: String,
}

/// The two shopping connections the skill can start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShoppingAction {
    AddToCart,
    Buy,
}

impl ShoppingAction {
    pub fn uri(self) -> &'static str {
        match self {
            ShoppingAction::AddToCart => "connection://AMAZON.AddToShoppingCart/1",
            ShoppingAction::Buy => "connection://AMAZON.BuyShoppingProducts/1",
        }
    }

    /// Correlation token echoed back in the session-resumed request
    pub fn token(self) -> &'static str {
        match self {
            ShoppingAction::AddToCart => "AddToShoppingCartToken",
            ShoppingAction::Buy => "PurchaseProductToken",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "AddToShoppingCartToken" => Some(ShoppingAction::AddToCart),
            "PurchaseProductToken" => Some(ShoppingAction::Buy),
            _ => None,
        }
    }

    /// Build the connection directive for an offered item
    pub fn directive(self, item: &OfferedItem) -> Directive {
        Directive {
            directive_type: START_CONNECTION.to_string(),
            uri: self.uri().to_string(),
            input: DirectiveInput {
                products: vec![ProductReference {
                    asin: item.asin.clone(),
                }],
            },
            token: self.token().to_string(),
        }
    }
}

/// Whether the session stays open after this response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionContinuation {
    Continue,
    End,
    /// Leave the decision to the platform; required when handing off a directive
    #[default]
    PlatformDecides,
}

impl SessionContinuation {
    fn should_end_session(self) -> Option<bool> {
        match self {
            SessionContinuation::Continue => Some(false),
            SessionContinuation::End => Some(true),
            SessionContinuation::PlatformDecides => None,
        }
    }
}

/// Accumulates one turn's output
#[derive(Debug, Clone, Default)]
pub struct ResponseBuilder {
    speech: Option<String>,
    reprompt: Option<String>,
    directive: Option<Directive>,
    continuation: SessionContinuation,
}

impl ResponseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn speak(mut self, text: impl Into<String>) -> Self {
        self.speech = Some(text.into());
        self
    }

    /// Setting a reprompt keeps the session open
    pub fn reprompt(mut self, text: impl Into<String>) -> Self {
        self.reprompt = Some(text.into());
        self.continuation = SessionContinuation::Continue;
        self
    }

    /// At most one directive per response; a later call replaces the earlier one
    pub fn add_directive(mut self, directive: Directive) -> Self {
        self.directive = Some(directive);
        self
    }

    pub fn with_continuation(mut self, continuation: SessionContinuation) -> Self {
        self.continuation = continuation;
        self
    }

    /// Finish the turn, attaching the session attributes to carry forward
    pub fn build(self, session_attributes: Map<String, Value>) -> ResponseEnvelope {
        let reprompt = match self.continuation {
            SessionContinuation::End => None,
            _ => self.reprompt.map(|text| Reprompt {
                output_speech: ssml(&text),
            }),
        };

        ResponseEnvelope {
            version: "1.0".to_string(),
            session_attributes,
            response: Response {
                output_speech: self.speech.as_deref().map(ssml),
                reprompt,
                directives: self.directive.into_iter().collect(),
                should_end_session: self.continuation.should_end_session(),
            },
        }
    }
}

fn ssml(text: &str) -> OutputSpeech {
    OutputSpeech {
        speech_type: "SSML".to_string(),
        ssml: format!("<speak>{}</speak>", text),
    }
}

impl ResponseEnvelope {
    /// Spoken text with the `<speak>` wrapper removed
    pub fn speech_text(&self) -> Option<&str> {
        self.response.output_speech.as_ref().map(unwrap_ssml)
    }

    /// Reprompt text with the `<speak>` wrapper removed
    pub fn reprompt_text(&self) -> Option<&str> {
        self.response
            .reprompt
            .as_ref()
            .map(|r| unwrap_ssml(&r.output_speech))
    }
}

fn unwrap_ssml(speech: &OutputSpeech) -> &str {
    speech
        .ssml
        .strip_prefix("<speak>")
        .and_then(|s| s.strip_suffix("</speak>"))
        .unwrap_or(&speech.ssml)
}
