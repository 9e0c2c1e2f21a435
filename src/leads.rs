//! Contact-form leads forwarded to the lead webhook.
//!
//! Delivery problems never reach the visitor: the form always reports
//! success and failures only show up in the log.

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

pub const CONTACT_PAGE_SOURCE: &str = "pagina_contacto";

/// Lead captured by a contact form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Lead {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub interest: String,
    #[serde(default)]
    pub source: Option<String>,
}

/// Posts leads to the automation webhook
pub struct LeadNotifier {
    client: Client,
    url: String,
}

impl LeadNotifier {
    pub fn new(url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    /// Forward a lead. Returns whether the webhook accepted it; callers
    /// report success to the visitor either way.
    pub async fn submit(&self, mut lead: Lead) -> bool {
        if lead.source.as_deref().map_or(true, |s| s.trim().is_empty()) {
            lead.source = Some(CONTACT_PAGE_SOURCE.to_string());
        }

        match self.client.post(&self.url).json(&lead).send().await {
            Ok(response) if response.status().is_success() => {
                info!("Lead from {} forwarded", lead.email);
                true
            }
            Ok(response) => {
                warn!("Lead webhook returned status: {}", response.status());
                false
            }
            Err(e) => {
                warn!("Lead webhook unreachable: {}", e);
                false
            }
        }
    }
}
