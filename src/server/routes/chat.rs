use std::sync::Arc;

use axum::extract::State;
use axum::response::Json;
use axum::routing::post;
use axum::Router;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::chat::ChatStatus;
use crate::server::error::ApiError;
use crate::server::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/chat", post(chat))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChatTurn {
    message: String,
    #[serde(default)]
    session_id: Option<String>,
    #[serde(default)]
    include_catalog: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChatAnswer {
    reply: String,
    session_id: String,
    status: ChatStatus,
}

async fn chat(
    State(state): State<Arc<AppState>>,
    Json(turn): Json<ChatTurn>,
) -> Result<Json<ChatAnswer>, ApiError> {
    if turn.message.trim().is_empty() {
        return Err(ApiError::BadRequest("message is required".to_string()));
    }

    // Clients persist the id we hand back and send it on later turns
    let session_id = turn
        .session_id
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let reply = state.chat.reply(&turn.message, &session_id, turn.include_catalog).await;

    Ok(Json(ChatAnswer {
        reply: reply.display_text().to_string(),
        session_id,
        status: reply.status(),
    }))
}
