use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::auth::CurrentUser;
use crate::models::{NewProperty, Property};
use crate::server::error::ApiError;
use crate::server::AppState;
use crate::store::FilterRequest;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/properties", get(list_properties).post(publish_property))
        .route("/api/properties/:id", get(property_detail))
}

#[derive(Deserialize)]
struct CatalogQuery {
    search: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    #[serde(rename = "priceRange")]
    price_range: Option<String>,
}

#[derive(Serialize)]
struct PropertyDetail {
    #[serde(flatten)]
    property: Property,
    whatsapp_url: Option<String>,
}

async fn list_properties(
    State(state): State<Arc<AppState>>,
    Query(q): Query<CatalogQuery>,
) -> Json<Vec<Property>> {
    let filters = FilterRequest::from_params(
        q.search.as_deref(),
        q.kind.as_deref(),
        q.price_range.as_deref(),
    );
    Json(state.catalog.query(&filters).await)
}

async fn property_detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<PropertyDetail>, ApiError> {
    let property = state.catalog.get_by_id(&id).await.ok_or(ApiError::NotFound)?;
    let whatsapp_url = property.whatsapp_url();
    Ok(Json(PropertyDetail {
        property,
        whatsapp_url,
    }))
}

async fn publish_property(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Json(new): Json<NewProperty>,
) -> Result<impl IntoResponse, ApiError> {
    let created = state.catalog.publish(&user, new).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
