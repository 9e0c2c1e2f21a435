use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rosire_realty::auth::CurrentUser;
use rosire_realty::config::{AppConfig, StoreBackend};
use rosire_realty::seed::sample_listings;
use rosire_realty::server;
use rosire_realty::store::{PropertyStore, SupabaseStore};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rosire-realty", version, about = "Inmobiliaria Rosire website backend")]
struct Cli {
    /// Config file (defaults to ./rosire.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API
    Serve,
    /// Insert the sample listings into the configured Supabase project
    Seed,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log.filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("🏠 Inmobiliaria Rosire backend");

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => server::serve(&config).await,
        Command::Seed => seed(&config).await,
    }
}

async fn seed(config: &AppConfig) -> Result<()> {
    if config.store.backend == StoreBackend::Memory {
        warn!("Memory backend is pre-seeded on startup, nothing to do");
        return Ok(());
    }

    let url = config
        .store
        .supabase_url
        .as_deref()
        .context("store.supabase_url is required for seeding")?;
    let service_key = config
        .store
        .service_role_key
        .as_deref()
        .context("store.service_role_key is required for seeding")?;

    let store = SupabaseStore::new(url, service_key, config.webhooks.timeout())?;
    let seeder = CurrentUser {
        id: "service_role".to_string(),
        email: "seed".to_string(),
        access_token: service_key.to_string(),
    };

    info!("📦 Inserting {} sample listings...", sample_listings().len());
    for listing in sample_listings() {
        let created = store
            .insert(&listing, &seeder)
            .await
            .with_context(|| format!("Failed to insert {}", listing.title))?;
        info!("✅ {} -> {}", created.title, created.id);
    }

    info!("💾 Catalog now holds {} listings", store.count().await?);
    Ok(())
}
