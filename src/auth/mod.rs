//! Identity of the caller, resolved from a bearer token by an external provider.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Authenticated user attached to a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
    #[serde(skip)]
    pub access_token: String,
}

/// Resolves an access token to the user it belongs to
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// `None` when the token is unknown, expired or cannot be checked
    async fn current_user(&self, access_token: &str) -> Option<CurrentUser>;
}

/// Supabase Auth (GoTrue) token lookup
pub struct SupabaseAuth {
    client: Client,
    user_url: String,
    anon_key: String,
}

#[derive(Deserialize)]
struct AuthUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

impl SupabaseAuth {
    pub fn new(base_url: &str, anon_key: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            user_url: format!("{}/auth/v1/user", base_url.trim_end_matches('/')),
            anon_key: anon_key.to_string(),
        })
    }
}

#[async_trait]
impl AuthProvider for SupabaseAuth {
    async fn current_user(&self, access_token: &str) -> Option<CurrentUser> {
        let response = match self
            .client
            .get(&self.user_url)
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                warn!("Auth lookup failed: {}", e);
                return None;
            }
        };

        if !response.status().is_success() {
            debug!("Auth rejected token with status {}", response.status());
            return None;
        }

        match response.json::<AuthUser>().await {
            Ok(user) => Some(CurrentUser {
                id: user.id,
                email: user.email.unwrap_or_default(),
                access_token: access_token.to_string(),
            }),
            Err(e) => {
                warn!("Failed to decode auth user: {}", e);
                None
            }
        }
    }
}

/// Fixed token table, for local runs against the memory store
#[derive(Debug, Default)]
pub struct StaticAuth {
    users: HashMap<String, String>,
}

impl StaticAuth {
    /// Build from `(token, email)` pairs
    pub fn new<I, T, E>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (T, E)>,
        T: Into<String>,
        E: Into<String>,
    {
        Self {
            users: pairs
                .into_iter()
                .map(|(t, e)| (t.into(), e.into()))
                .collect(),
        }
    }
}

#[async_trait]
impl AuthProvider for StaticAuth {
    async fn current_user(&self, access_token: &str) -> Option<CurrentUser> {
        self.users.get(access_token).map(|email| CurrentUser {
            id: email.clone(),
            email: email.clone(),
            access_token: access_token.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_auth_resolves_known_tokens_only() {
        let auth = StaticAuth::new([("secret", "rosire@example.com")]);

        let user = auth.current_user("secret").await.unwrap();
        assert_eq!(user.email, "rosire@example.com");
        assert_eq!(user.access_token, "secret");

        assert!(auth.current_user("other").await.is_none());
    }
}
