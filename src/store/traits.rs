use crate::auth::CurrentUser;
use crate::models::{NewProperty, Property};
use crate::store::types::FilterRequest;
use async_trait::async_trait;
use thiserror::Error;

/// Result type alias for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors raised by a property store backend
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Store returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode store response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Store response is missing the row count")]
    MissingCount,

    #[error("Store did not return the inserted row")]
    EmptyInsert,
}

/// Common trait for property persistence backends
#[async_trait]
pub trait PropertyStore: Send + Sync {
    /// Listings matching `filters`, featured first then newest first
    async fn list(&self, filters: &FilterRequest) -> StoreResult<Vec<Property>>;

    /// Exact-key lookup; `Ok(None)` when no row has this id
    async fn get(&self, id: &str) -> StoreResult<Option<Property>>;

    /// Total number of listings, ignoring any filter
    async fn count(&self) -> StoreResult<u64>;

    /// Persist a new listing on behalf of `user`
    async fn insert(&self, new: &NewProperty, user: &CurrentUser) -> StoreResult<Property>;

    /// Get the name of the backend
    fn backend_name(&self) -> &'static str;
}
