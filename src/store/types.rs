use crate::models::{ListingType, Property};
use std::cmp::Ordering;
use tracing::debug;

/// Price bracket offered by the catalog filters.
///
/// Brackets are closed at both ends, so a listing priced exactly at a
/// shared boundary (100 000 or 300 000) belongs to both neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceRange {
    UpTo100k,
    From100kTo300k,
    From300k,
}

impl PriceRange {
    /// Parse the query-string value; unknown values yield `None`
    pub fn from_param(value: &str) -> Option<Self> {
        match value.trim() {
            "0-100000" => Some(PriceRange::UpTo100k),
            "100000-300000" => Some(PriceRange::From100kTo300k),
            "300000+" => Some(PriceRange::From300k),
            _ => None,
        }
    }

    /// Inclusive (min, max) bounds
    pub fn bounds(&self) -> (Option<f64>, Option<f64>) {
        match self {
            PriceRange::UpTo100k => (None, Some(100_000.0)),
            PriceRange::From100kTo300k => (Some(100_000.0), Some(300_000.0)),
            PriceRange::From300k => (Some(300_000.0), None),
        }
    }

    pub fn contains(&self, price: f64) -> bool {
        let (min, max) = self.bounds();
        min.map_or(true, |m| price >= m) && max.map_or(true, |m| price <= m)
    }
}

/// Catalog query filters. Every field is optional and all set fields
/// must hold (conjunction).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterRequest {
    pub search: Option<String>,
    pub listing_type: Option<ListingType>,
    pub price_range: Option<PriceRange>,
}

impl FilterRequest {
    /// Build filters from raw query-string values. Empty values mean
    /// "unset" and unrecognised values impose no constraint.
    pub fn from_params(search: Option<&str>, kind: Option<&str>, price_range: Option<&str>) -> Self {
        let search = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let listing_type = kind
            .filter(|k| !k.trim().is_empty())
            .and_then(|k| match k.parse::<ListingType>() {
                Ok(t) => Some(t),
                Err(e) => {
                    debug!("Ignoring type filter: {}", e);
                    None
                }
            });

        let price_range = price_range
            .filter(|p| !p.trim().is_empty())
            .and_then(|p| {
                let range = PriceRange::from_param(p);
                if range.is_none() {
                    debug!("Ignoring unknown price range: {}", p);
                }
                range
            });

        Self {
            search,
            listing_type,
            price_range,
        }
    }

    /// Search text with surrounding whitespace removed, if any is left
    pub fn search_text(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    /// Whether a listing satisfies every filter that is set
    pub fn matches(&self, property: &Property) -> bool {
        if let Some(kind) = self.listing_type {
            if property.listing_type != kind {
                return false;
            }
        }

        if let Some(needle) = self.search_text() {
            let needle = needle.to_lowercase();
            let in_title = property.title.to_lowercase().contains(&needle);
            let in_location = property.location.to_lowercase().contains(&needle);
            if !in_title && !in_location {
                return false;
            }
        }

        if let Some(range) = self.price_range {
            if !range.contains(property.price) {
                return false;
            }
        }

        true
    }
}

/// Catalog order: featured listings first, then newest first
pub fn catalog_order(a: &Property, b: &Property) -> Ordering {
    b.featured
        .cmp(&a.featured)
        .then_with(|| b.created_at.cmp(&a.created_at))
}
