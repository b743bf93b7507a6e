//! HTTP implementation of [`AiGateway`] over reqwest.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use tracing::{info, instrument, warn};

use crate::{AiGateway, GatewayError, GatewayReply, GatewayRequest};

/// Upper bound on a single gateway call (connect + response body).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const LOG_PREVIEW_LEN: usize = 200;

/// Posts [`GatewayRequest`] JSON to a fixed endpoint.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    endpoint: String,
}

impl HttpGateway {
    /// Builds a client with the given per-request timeout.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

fn preview(text: &str) -> String {
    match text.char_indices().nth(LOG_PREVIEW_LEN) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[async_trait]
impl AiGateway for HttpGateway {
    #[instrument(skip(self, request), fields(endpoint = %self.endpoint, user_id = ?request.user_id))]
    async fn ask(&self, request: GatewayRequest) -> Result<String, GatewayError> {
        info!(
            message_preview = %preview(&request.message),
            message_len = request.message.len(),
            has_context = request.context.is_some(),
            "step: gateway request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header(header::ACCEPT, "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, timeout = e.is_timeout(), "Gateway request failed");
                GatewayError::from(e)
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            warn!(status = %status, "Gateway rate limited");
            return Err(GatewayError::RateLimited);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %preview(&body), "Gateway returned error status");
            return Err(GatewayError::Unavailable(format!("HTTP {}: {}", status, body)));
        }

        let body = response.text().await.map_err(|e| {
            warn!(error = %e, "Failed to read gateway response body");
            GatewayError::from(e)
        })?;
        let reply = GatewayReply::parse(&body);
        if let GatewayReply::Unrecognized(_) = reply {
            warn!(body = %preview(&body), "Unrecognized gateway reply shape, relaying raw payload");
        }
        let text = reply.into_text();
        if text.trim().is_empty() {
            warn!("Gateway returned an empty reply");
            return Err(GatewayError::Unavailable("empty reply".to_string()));
        }
        info!(reply_len = text.len(), "step: gateway request done");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let long = "é".repeat(LOG_PREVIEW_LEN + 10);
        let p = preview(&long);
        assert!(p.ends_with("..."));
        assert_eq!(p.chars().count(), LOG_PREVIEW_LEN + 3);
        assert_eq!(preview("short"), "short");
    }
}
