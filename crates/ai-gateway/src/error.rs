//! Gateway failure outcomes and their fixed user-facing messages.

use thiserror::Error;

pub const MSG_TIMEOUT: &str =
    "⏱️ The AI is taking too long to respond. Please try a shorter request.";
pub const MSG_RATE_LIMITED: &str = "🚫 Too many requests! Please wait a minute and try again.";
pub const MSG_UNAVAILABLE: &str =
    "⚠️ The AI service is currently unavailable. Please try again later.";

/// The three ways a gateway call can fail. Raw transport detail stays in `Unavailable` for logs only.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("AI gateway timed out")]
    Timeout,

    #[error("AI gateway rate limited the request (HTTP 429)")]
    RateLimited,

    #[error("AI gateway unavailable: {0}")]
    Unavailable(String),
}

impl GatewayError {
    /// Fixed text shown to the user for this outcome.
    pub fn user_message(&self) -> &'static str {
        match self {
            GatewayError::Timeout => MSG_TIMEOUT,
            GatewayError::RateLimited => MSG_RATE_LIMITED,
            GatewayError::Unavailable(_) => MSG_UNAVAILABLE,
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            GatewayError::Timeout
        } else if e.status() == Some(reqwest::StatusCode::TOO_MANY_REQUESTS) {
            GatewayError::RateLimited
        } else {
            GatewayError::Unavailable(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages_are_fixed_per_outcome() {
        assert_eq!(GatewayError::Timeout.user_message(), MSG_TIMEOUT);
        assert_eq!(GatewayError::RateLimited.user_message(), MSG_RATE_LIMITED);
        assert_eq!(
            GatewayError::Unavailable("connection refused".to_string()).user_message(),
            MSG_UNAVAILABLE
        );
    }

    #[test]
    fn test_user_message_hides_transport_detail() {
        let e = GatewayError::Unavailable("dns error: no such host".to_string());
        assert!(!e.user_message().contains("dns"));
        assert!(e.to_string().contains("dns"));
    }
}
