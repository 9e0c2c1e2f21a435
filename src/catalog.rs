//! Catalog reads and the publish operation.
//!
//! Reads fail open: a broken store never breaks a page, it shows an empty
//! catalog and leaves a warning in the log.

use crate::auth::CurrentUser;
use crate::models::{ListingType, NewProperty, Property};
use crate::store::{FilterRequest, PropertyStore, StoreError};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors surfaced by the publish operation
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Invalid listing: {0}")]
    Invalid(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct PropertyService {
    store: Arc<dyn PropertyStore>,
}

impl PropertyService {
    pub fn new(store: Arc<dyn PropertyStore>) -> Self {
        Self { store }
    }

    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    /// Filtered catalog, featured first then newest first
    pub async fn query(&self, filters: &FilterRequest) -> Vec<Property> {
        match self.store.list(filters).await {
            Ok(properties) => {
                debug!("Catalog query {:?} returned {} listings", filters, properties.len());
                properties
            }
            Err(e) => {
                warn!("Error fetching properties: {}", e);
                Vec::new()
            }
        }
    }

    /// Single listing, `None` when it does not exist or cannot be read
    pub async fn get_by_id(&self, id: &str) -> Option<Property> {
        match self.store.get(id).await {
            Ok(found) => found,
            Err(e) => {
                warn!("Error fetching property {}: {}", id, e);
                None
            }
        }
    }

    /// Total listings for dashboard statistics, 0 on failure
    pub async fn count(&self) -> u64 {
        match self.store.count().await {
            Ok(n) => n,
            Err(e) => {
                warn!("Error counting properties: {}", e);
                0
            }
        }
    }

    /// Validate and persist a new listing on behalf of `user`
    pub async fn publish(&self, user: &CurrentUser, mut new: NewProperty) -> Result<Property, CatalogError> {
        validate(&new)?;

        new.title = new.title.trim().to_string();
        new.location = new.location.trim().to_string();
        if new.price_label.trim().is_empty() {
            new.price_label = price_label(new.price, new.listing_type);
        }

        let created = self.store.insert(&new, user).await?;
        info!("Published listing {} ({}) by {}", created.id, created.title, user.email);
        Ok(created)
    }
}

fn validate(new: &NewProperty) -> Result<(), CatalogError> {
    if new.title.trim().is_empty() {
        return Err(CatalogError::Invalid("title is required".to_string()));
    }
    if new.location.trim().is_empty() {
        return Err(CatalogError::Invalid("location is required".to_string()));
    }
    if !new.price.is_finite() || new.price <= 0.0 {
        return Err(CatalogError::Invalid("price must be greater than zero".to_string()));
    }
    if !new.baths.is_finite() || new.baths < 0.0 {
        return Err(CatalogError::Invalid("baths cannot be negative".to_string()));
    }
    Ok(())
}

/// Display label such as `$285,000` or `$3,500/mes`
pub fn price_label(price: f64, listing_type: ListingType) -> String {
    let digits = format!("{:.0}", price.round());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match listing_type {
        ListingType::Sale => format!("${grouped}"),
        ListingType::Rental => format!("${grouped}/mes"),
    }
}
