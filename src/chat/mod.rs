pub mod context;
pub mod extract;
pub mod webhook;

pub use context::catalog_context;
pub use extract::extract_reply;
pub use webhook::{ChatClient, ChatError, ChatRequest, WebhookBody};

use crate::catalog::PropertyService;
use crate::store::FilterRequest;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Shown when the webhook could not be reached or answered with an error
pub const UNREACHABLE_REPLY: &str =
    "Lo siento, no pude conectar con el asistente. Por favor intenta de nuevo en unos minutos.";

/// Shown when the webhook answered but no reply could be read from it
pub const UNPARSEABLE_REPLY: &str =
    "Lo siento, hubo un error al procesar tu mensaje. Por favor intenta de nuevo.";

/// Outcome of one chat turn
#[derive(Debug, Clone, PartialEq)]
pub enum ChatReply {
    Answer(String),
    Unparseable,
    Unreachable,
}

/// Wire label of a [`ChatReply`]
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChatStatus {
    Ok,
    Unparseable,
    Unreachable,
}

impl ChatReply {
    /// Text to show the visitor
    pub fn display_text(&self) -> &str {
        match self {
            ChatReply::Answer(text) => text,
            ChatReply::Unparseable => UNPARSEABLE_REPLY,
            ChatReply::Unreachable => UNREACHABLE_REPLY,
        }
    }

    pub fn status(&self) -> ChatStatus {
        match self {
            ChatReply::Answer(_) => ChatStatus::Ok,
            ChatReply::Unparseable => ChatStatus::Unparseable,
            ChatReply::Unreachable => ChatStatus::Unreachable,
        }
    }
}

/// Turn a webhook body into a reply
pub fn reply_from_body(body: &WebhookBody) -> ChatReply {
    let text = match body {
        WebhookBody::Json(value) => extract_reply(value),
        WebhookBody::Text(text) => (!text.trim().is_empty()).then(|| text.clone()),
        WebhookBody::Malformed(_) => None,
    };
    text.map(ChatReply::Answer).unwrap_or(ChatReply::Unparseable)
}

/// Relays visitor messages to the automation webhook
pub struct ChatService {
    client: ChatClient,
    catalog: Arc<PropertyService>,
}

impl ChatService {
    pub fn new(client: ChatClient, catalog: Arc<PropertyService>) -> Self {
        Self { client, catalog }
    }

    /// Send one message; with `include_catalog` the current inventory is
    /// attached as `systemContext`
    pub async fn reply(&self, message: &str, session_id: &str, include_catalog: bool) -> ChatReply {
        let system_context = if include_catalog {
            let properties = self.catalog.query(&FilterRequest::default()).await;
            Some(catalog_context(&properties))
        } else {
            None
        };

        let request = ChatRequest {
            message: message.to_string(),
            session_id: session_id.to_string(),
            system_context,
        };

        match self.client.send(&request).await {
            Ok(body) => {
                let reply = reply_from_body(&body);
                if reply == ChatReply::Unparseable {
                    warn!("No reply found in chat webhook payload for session {}", session_id);
                } else {
                    info!("Chat reply delivered for session {}", session_id);
                }
                reply
            }
            Err(e) => {
                warn!("Chat webhook unreachable: {}", e);
                ChatReply::Unreachable
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_body_used_verbatim() {
        let reply = reply_from_body(&WebhookBody::Text("Claro, te ayudo.\n".to_string()));
        assert_eq!(reply, ChatReply::Answer("Claro, te ayudo.\n".to_string()));
    }

    #[test]
    fn test_unparseable_bodies() {
        assert_eq!(reply_from_body(&WebhookBody::Text("  ".to_string())), ChatReply::Unparseable);
        assert_eq!(
            reply_from_body(&WebhookBody::Json(json!({ "ok": true }))),
            ChatReply::Unparseable
        );
        assert_eq!(
            reply_from_body(&WebhookBody::Malformed("{oops".to_string())),
            ChatReply::Unparseable
        );
    }

    #[test]
    fn test_fallback_texts_are_distinct() {
        assert_ne!(
            ChatReply::Unparseable.display_text(),
            ChatReply::Unreachable.display_text()
        );
        assert_eq!(ChatReply::Answer("hola".to_string()).display_text(), "hola");
    }
}
