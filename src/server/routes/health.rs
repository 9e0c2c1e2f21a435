use std::sync::Arc;

use axum::extract::State;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use serde_json::{json, Value};

use crate::server::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/health", get(api_health))
}

async fn api_health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "store": state.catalog.backend_name(),
    }))
}
