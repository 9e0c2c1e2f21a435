use crate::auth::CurrentUser;
use crate::models::{NewProperty, Property};
use crate::store::traits::{PropertyStore, StoreResult};
use crate::store::types::{catalog_order, FilterRequest};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// Process-local property store
#[derive(Default)]
pub struct MemoryStore {
    rows: RwLock<Vec<Property>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given listings
    pub fn with_properties(properties: Vec<Property>) -> Self {
        Self {
            rows: RwLock::new(properties),
        }
    }
}

#[async_trait]
impl PropertyStore for MemoryStore {
    async fn list(&self, filters: &FilterRequest) -> StoreResult<Vec<Property>> {
        let rows = self.rows.read().await;
        let mut hits: Vec<Property> = rows.iter().filter(|p| filters.matches(p)).cloned().collect();
        hits.sort_by(catalog_order);
        debug!("Memory store matched {} of {} listings", hits.len(), rows.len());
        Ok(hits)
    }

    async fn get(&self, id: &str) -> StoreResult<Option<Property>> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|p| p.id == id).cloned())
    }

    async fn count(&self) -> StoreResult<u64> {
        Ok(self.rows.read().await.len() as u64)
    }

    async fn insert(&self, new: &NewProperty, user: &CurrentUser) -> StoreResult<Property> {
        let property = Property::from_new(new.clone(), Uuid::new_v4().to_string(), Utc::now());
        debug!("Inserting listing {} for {}", property.id, user.email);
        self.rows.write().await.push(property.clone());
        Ok(property)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
