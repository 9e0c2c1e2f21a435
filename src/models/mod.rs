use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Transaction type of a listing, stored with its catalog label
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ListingType {
    #[serde(rename = "Venta")]
    Sale,
    #[serde(rename = "Alquiler")]
    Rental,
}

impl ListingType {
    /// Label used by the property table and the catalog query string
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingType::Sale => "Venta",
            ListingType::Rental => "Alquiler",
        }
    }
}

impl fmt::Display for ListingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Venta" | "venta" | "sale" | "Sale" => Ok(ListingType::Sale),
            "Alquiler" | "alquiler" | "rental" | "Rental" => Ok(ListingType::Rental),
            other => Err(format!("unknown listing type: {other}")),
        }
    }
}

/// Core property data model, one row of the `properties` table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Property {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub price_label: String,
    #[serde(rename = "type")]
    pub listing_type: ListingType,
    pub location: String,
    pub beds: u32,
    pub baths: f64,
    #[serde(default)]
    pub area: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub agent_name: Option<String>,
    #[serde(default)]
    pub agent_phone: Option<String>,
    #[serde(default)]
    pub agent_email: Option<String>,
    #[serde(default)]
    pub agent_photo_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub amenities: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Property {
    /// Build a listing from publish input, assigning identity and creation time
    pub fn from_new(new: NewProperty, id: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: new.title,
            description: new.description,
            price: new.price,
            price_label: new.price_label,
            listing_type: new.listing_type,
            location: new.location,
            beds: new.beds,
            baths: new.baths,
            area: new.area,
            image_url: new.image_url,
            featured: new.featured,
            agent_name: new.agent_name,
            agent_phone: new.agent_phone,
            agent_email: new.agent_email,
            agent_photo_url: new.agent_photo_url,
            amenities: new.amenities,
            created_at,
        }
    }

    /// WhatsApp deep link to the listing agent, prefilled with an enquiry
    pub fn whatsapp_url(&self) -> Option<String> {
        let digits: String = self
            .agent_phone
            .as_deref()?
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();
        if digits.is_empty() {
            return None;
        }

        let text = format!(
            "Hola, estoy interesado/a en la propiedad: {} ({}). ¿Podría darme más información?",
            self.title, self.price_label
        );
        let base = format!("https://wa.me/{digits}");
        url::Url::parse_with_params(&base, &[("text", text)])
            .ok()
            .map(String::from)
    }
}

/// Listing fields accepted by the publish operation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewProperty {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub price_label: String,
    #[serde(rename = "type")]
    pub listing_type: ListingType,
    pub location: String,
    #[serde(default)]
    pub beds: u32,
    #[serde(default)]
    pub baths: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_photo_url: Option<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row() -> serde_json::Value {
        json!({
            "id": "7d9f3c1e-0000-4000-8000-000000000001",
            "title": "Apartamento Moderno en Piantini",
            "description": null,
            "price": 285000,
            "price_label": "$285,000",
            "type": "Venta",
            "location": "Piantini, Santo Domingo",
            "beds": 3,
            "baths": 3.5,
            "area": "185 m²",
            "image_url": null,
            "featured": false,
            "agent_name": "Carlos Méndez",
            "agent_phone": "+1 (809) 555-0202",
            "agent_email": null,
            "agent_photo_url": null,
            "amenities": null,
            "created_at": "2025-01-10T12:00:00+00:00"
        })
    }

    #[test]
    fn test_property_reads_table_row() {
        let property: Property = serde_json::from_value(row()).unwrap();
        assert_eq!(property.listing_type, ListingType::Sale);
        assert_eq!(property.baths, 3.5);
        assert!(property.amenities.is_empty());
    }

    #[test]
    fn test_listing_type_labels() {
        assert_eq!("Alquiler".parse::<ListingType>(), Ok(ListingType::Rental));
        assert_eq!("sale".parse::<ListingType>(), Ok(ListingType::Sale));
        assert!("Permuta".parse::<ListingType>().is_err());
        assert_eq!(
            serde_json::to_value(ListingType::Rental).unwrap(),
            json!("Alquiler")
        );
    }

    #[test]
    fn test_whatsapp_url_keeps_only_phone_digits() {
        let property: Property = serde_json::from_value(row()).unwrap();
        let url = property.whatsapp_url().unwrap();
        assert!(url.starts_with("https://wa.me/18095550202?text="));
        assert!(url.contains("Piantini"));
    }

    #[test]
    fn test_whatsapp_url_without_phone() {
        let mut property: Property = serde_json::from_value(row()).unwrap();
        property.agent_phone = Some("n/a".to_string());
        assert!(property.whatsapp_url().is_none());
        property.agent_phone = None;
        assert!(property.whatsapp_url().is_none());
    }
}
