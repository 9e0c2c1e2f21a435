use std::sync::Arc;

use axum::extract::State;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use serde_json::{json, Value};

use crate::auth::CurrentUser;
use crate::server::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/dashboard", get(dashboard))
}

async fn dashboard(State(state): State<Arc<AppState>>, user: CurrentUser) -> Json<Value> {
    let count = state.catalog.count().await;
    Json(json!({
        "email": user.email,
        "propertiesCount": count,
    }))
}
