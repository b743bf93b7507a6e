//! # AI gateway client
//!
//! Defines the [`AiGateway`] trait and an HTTP implementation. One call per user turn, no retries.
//! Reply bodies are decoded by [`GatewayReply`]; failures collapse into three [`GatewayError`] outcomes
//! that each carry a fixed user-facing message.

use async_trait::async_trait;
use serde::Serialize;

mod error;
mod http;
mod reply;

pub use error::{GatewayError, MSG_RATE_LIMITED, MSG_TIMEOUT, MSG_UNAVAILABLE};
pub use http::{HttpGateway, DEFAULT_TIMEOUT};
pub use reply::GatewayReply;

/// JSON body posted to the gateway: `{ message, user_id?, context? }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GatewayRequest {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl GatewayRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            user_id: None,
            context: None,
        }
    }

    pub fn with_user_id(mut self, user_id: impl ToString) -> Self {
        self.user_id = Some(user_id.to_string());
        self
    }

    /// Attaches a context hint (e.g. recent history lines). `None` or blank leaves the field out.
    pub fn with_context(mut self, context: Option<String>) -> Self {
        self.context = context.filter(|c| !c.trim().is_empty());
        self
    }
}

/// Remote AI completion endpoint. Implementations make at most one attempt per call.
#[async_trait]
pub trait AiGateway: Send + Sync {
    /// Sends the request and returns the answer text, or one of the mapped failure outcomes.
    async fn ask(&self, request: GatewayRequest) -> Result<String, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_only_present_fields() {
        let body = serde_json::to_value(GatewayRequest::new("hi")).unwrap();
        assert_eq!(body, serde_json::json!({ "message": "hi" }));

        let body = serde_json::to_value(
            GatewayRequest::new("hi")
                .with_user_id(42)
                .with_context(Some("User: a\nAI: b".to_string())),
        )
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "message": "hi", "user_id": "42", "context": "User: a\nAI: b" })
        );
    }

    #[test]
    fn test_blank_context_is_dropped() {
        let request = GatewayRequest::new("hi").with_context(Some("   ".to_string()));
        assert!(request.context.is_none());
    }
}
