pub mod auth;
pub mod error;
pub mod routes;

use crate::auth::{AuthProvider, StaticAuth, SupabaseAuth};
use crate::catalog::PropertyService;
use crate::chat::{ChatClient, ChatService};
use crate::config::{AppConfig, StoreBackend};
use crate::leads::LeadNotifier;
use crate::seed::sample_properties;
use crate::store::{MemoryStore, PropertyStore, SupabaseStore};
use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared services handed to every request handler
pub struct AppState {
    pub catalog: Arc<PropertyService>,
    pub chat: ChatService,
    pub leads: Arc<LeadNotifier>,
    pub auth: Arc<dyn AuthProvider>,
}

impl AppState {
    /// Wire services from configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let timeout = config.webhooks.timeout();

        let (store, auth): (Arc<dyn PropertyStore>, Arc<dyn AuthProvider>) = match config.store.backend {
            StoreBackend::Memory => (
                Arc::new(MemoryStore::with_properties(sample_properties())),
                Arc::new(StaticAuth::new(
                    config
                        .auth
                        .dev_users
                        .iter()
                        .map(|u| (u.token.clone(), u.email.clone())),
                )),
            ),
            StoreBackend::Supabase => {
                let url = config
                    .store
                    .supabase_url
                    .as_deref()
                    .context("store.supabase_url is required for the supabase backend")?;
                let key = config
                    .store
                    .anon_key
                    .as_deref()
                    .context("store.anon_key is required for the supabase backend")?;
                (
                    Arc::new(SupabaseStore::new(url, key, timeout)?),
                    Arc::new(SupabaseAuth::new(url, key, timeout)?),
                )
            }
        };

        let catalog = Arc::new(PropertyService::new(store));
        let chat = ChatService::new(
            ChatClient::new(&config.webhooks.chat_url, timeout)?,
            catalog.clone(),
        );
        let leads = Arc::new(LeadNotifier::new(&config.webhooks.lead_url, timeout)?);

        Ok(Self {
            catalog,
            chat,
            leads,
            auth,
        })
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::properties::router())
        .merge(routes::dashboard::router())
        .merge(routes::chat::router())
        .merge(routes::leads::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until the process is stopped
pub async fn serve(config: &AppConfig) -> Result<()> {
    let state = Arc::new(AppState::from_config(config)?);
    info!("Catalog backed by {} store", state.catalog.backend_name());

    let listener = tokio::net::TcpListener::bind(&config.server.bind)
        .await
        .with_context(|| format!("Failed to bind to {}", config.server.bind))?;
    info!("Listening on {}", config.server.bind);

    axum::serve(listener, router(state))
        .await
        .context("Server error")
}
