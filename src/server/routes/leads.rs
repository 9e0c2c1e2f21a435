use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use axum::routing::post;
use axum::Router;
use serde_json::json;

use crate::leads::Lead;
use crate::server::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/leads", post(submit_lead))
}

// Forwarding runs detached; the visitor sees success whatever the webhook does
async fn submit_lead(State(state): State<Arc<AppState>>, Json(lead): Json<Lead>) -> impl IntoResponse {
    let leads = state.leads.clone();
    tokio::spawn(async move {
        leads.submit(lead).await;
    });
    (StatusCode::ACCEPTED, Json(json!({ "status": "received" })))
}
