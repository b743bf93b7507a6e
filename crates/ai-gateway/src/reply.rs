//! Decoding of gateway reply bodies.
//!
//! The upstream answers in one of several shapes. Each known shape has its own variant and decoding
//! branch, tried in priority order; anything else lands in [`GatewayReply::Unrecognized`].

use serde_json::Value;

/// A decoded gateway reply.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayReply {
    /// Body is a JSON string, or not JSON at all.
    Text(String),
    /// `{ "response": "..." }`
    Response(String),
    /// `{ "choices": [{ "text": "..." }, ...] }`; first choice wins.
    Choice(String),
    /// Unknown payload; rendered as compact JSON.
    Unrecognized(Value),
}

impl GatewayReply {
    /// Parses a raw response body. Non-JSON bodies are taken verbatim as text.
    pub fn parse(body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(value) => Self::from_value(value),
            Err(_) => GatewayReply::Text(body.to_string()),
        }
    }

    /// Classifies an already-parsed JSON payload.
    pub fn from_value(value: Value) -> Self {
        if let Value::String(text) = value {
            return GatewayReply::Text(text);
        }
        if let Some(text) = non_empty_str(value.get("response")) {
            return GatewayReply::Response(text.to_string());
        }
        let first_choice_text = value
            .get("choices")
            .and_then(|choices| choices.get(0))
            .and_then(|choice| non_empty_str(choice.get("text")));
        if let Some(text) = first_choice_text {
            return GatewayReply::Choice(text.to_string());
        }
        GatewayReply::Unrecognized(value)
    }

    /// The answer text to relay to the user.
    pub fn into_text(self) -> String {
        match self {
            GatewayReply::Text(text)
            | GatewayReply::Response(text)
            | GatewayReply::Choice(text) => text,
            GatewayReply::Unrecognized(value) => value.to_string(),
        }
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}
