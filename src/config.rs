//! Layered configuration: built-in defaults, then `rosire.toml` (or an
//! explicit path), then `ROSIRE_*` environment variables.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const PROJECT_CONFIG_FILE: &str = "rosire.toml";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub webhooks: WebhookConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:3000".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Memory,
    Supabase,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    #[serde(default)]
    pub supabase_url: Option<String>,
    #[serde(default)]
    pub anon_key: Option<String>,
    /// Only used by the `seed` command
    #[serde(default)]
    pub service_role_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WebhookConfig {
    pub chat_url: String,
    pub lead_url: String,
    /// Unset leaves the HTTP client default in place
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            chat_url: "http://127.0.0.1:5678/webhook/chat".to_string(),
            lead_url: "http://127.0.0.1:5678/webhook/leads".to_string(),
            timeout_secs: None,
        }
    }
}

impl WebhookConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AuthConfig {
    /// Token/email pairs accepted when no auth service is configured
    #[serde(default)]
    pub dev_users: Vec<DevUser>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DevUser {
    pub token: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogConfig {
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info,tower_http=debug".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `ROSIRE_*` environment variables (`ROSIRE_STORE__BACKEND=supabase`)
    /// 2. Explicit config path, or `./rosire.toml` when present
    /// 3. Default values
    pub fn load(config_path: Option<&Path>) -> Result<Self, Box<figment::Error>> {
        Self::figment(config_path).extract().map_err(Box::new)
    }

    pub fn figment(config_path: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        match config_path {
            Some(path) => figment = figment.merge(Toml::file(path)),
            None => {
                let path = PathBuf::from(PROJECT_CONFIG_FILE);
                if path.exists() {
                    figment = figment.merge(Toml::file(path));
                }
            }
        }

        figment.merge(Env::prefixed("ROSIRE_").split("__"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_run_without_external_services() {
        let config = AppConfig::default();
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert!(config.webhooks.timeout().is_none());
        assert!(config.auth.dev_users.is_empty());
    }

    #[test]
    fn test_file_and_env_layers() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "custom.toml",
                r#"
                [store]
                backend = "supabase"
                supabase_url = "https://db.example.com"
                anon_key = "anon"

                [webhooks]
                chat_url = "https://hooks.example.com/chat"
                lead_url = "https://hooks.example.com/leads"
                timeout_secs = 20

                [[auth.dev_users]]
                token = "t1"
                email = "agente@example.com"
                "#,
            )?;
            jail.set_env("ROSIRE_SERVER__BIND", "127.0.0.1:8080");

            let config = AppConfig::figment(Some(Path::new("custom.toml"))).extract::<AppConfig>()?;
            assert_eq!(config.store.backend, StoreBackend::Supabase);
            assert_eq!(config.store.supabase_url.as_deref(), Some("https://db.example.com"));
            assert_eq!(config.webhooks.timeout(), Some(Duration::from_secs(20)));
            assert_eq!(config.auth.dev_users[0].email, "agente@example.com");
            assert_eq!(config.server.bind, "127.0.0.1:8080");
            Ok(())
        });
    }
}
