mod app;
mod config;
mod db;
mod errors;
mod external;
mod models;
mod routes;
mod services;
mod session;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tower_sessions::cookie::Key;
use tower_sessions::{MemoryStore, SessionManagerLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;
use crate::external::alphavantage::AlphaVantageQuotes;
use crate::external::oidc::OidcClient;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging FIRST
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    let db = db::connect(&config.mongo_uri, &config.mongo_db).await?;
    tracing::info!("📦 MongoDB client initialized for database '{}'", config.mongo_db);

    if config.alphavantage_api_key.is_none() {
        tracing::warn!("ALPHAVANTAGE_API_KEY not set, quotes will be unavailable");
    }
    let quotes: Arc<dyn crate::external::quote_provider::QuoteProvider> =
        Arc::new(AlphaVantageQuotes::from_config(&config)?);

    let oidc = Arc::new(OidcClient::from_config(&config)?);
    if !oidc.is_configured() {
        tracing::warn!("Google OAuth credentials not set, sign-in is disabled");
    }

    let sessions = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(false)
        .with_signed(signing_key(config.session_secret.as_deref()));

    let state = AppState { db, quotes, oidc };
    let app = app::create_app(state, sessions);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("🚀 Stockfolio backend running at http://{}/", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

// Cookie signing wants at least 64 bytes of key material; anything less
// falls back to a fresh key, which only costs sessions across restarts.
fn signing_key(secret: Option<&str>) -> Key {
    match secret {
        Some(secret) => Key::try_from(secret.as_bytes()).unwrap_or_else(|_| {
            tracing::warn!("SESSION_SECRET is too short, using an ephemeral signing key");
            Key::generate()
        }),
        None => {
            tracing::warn!("SESSION_SECRET not set, using an ephemeral signing key");
            Key::generate()
        }
    }
}
