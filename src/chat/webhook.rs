use anyhow::{Context, Result};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that mean the webhook could not be reached or refused the call
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Webhook request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Webhook returned status {0}")]
    Status(u16),
}

/// Body posted to the chat webhook
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    pub session_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_context: Option<String>,
}

/// Webhook response body, split by content type
#[derive(Debug, Clone, PartialEq)]
pub enum WebhookBody {
    Json(Value),
    Text(String),
    /// Declared JSON but could not be parsed
    Malformed(String),
}

/// HTTP client for the chat automation webhook
pub struct ChatClient {
    client: Client,
    url: String,
}

impl ChatClient {
    pub fn new(url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    /// Post one chat turn and return the raw webhook body
    pub async fn send(&self, request: &ChatRequest) -> Result<WebhookBody, ChatError> {
        debug!("Posting chat turn for session {}", request.session_id);

        let response = self
            .client
            .post(&self.url)
            .header(ACCEPT, "application/json")
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            warn!("Chat webhook returned status: {}", response.status());
            return Err(ChatError::Status(response.status().as_u16()));
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.contains("application/json"))
            .unwrap_or(false);

        let text = response.text().await?;
        if !is_json {
            return Ok(WebhookBody::Text(text));
        }

        Ok(match serde_json::from_str(&text) {
            Ok(value) => WebhookBody::Json(value),
            Err(e) => {
                warn!("Chat webhook sent invalid JSON: {}", e);
                WebhookBody::Malformed(text)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_wire_shape() {
        let plain = ChatRequest {
            message: "Hola".to_string(),
            session_id: "s-1".to_string(),
            system_context: None,
        };
        assert_eq!(
            serde_json::to_value(&plain).unwrap(),
            json!({ "message": "Hola", "sessionId": "s-1" })
        );

        let enriched = ChatRequest {
            system_context: Some("inventory".to_string()),
            ..plain
        };
        assert_eq!(
            serde_json::to_value(&enriched).unwrap()["systemContext"],
            json!("inventory")
        );
    }
}
