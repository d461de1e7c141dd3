//! Keydir Proxy - caching HTTP front-end for PGP key directory assets
//!
//! Serves public key files, Web Key Directory entries, and policy documents
//! from a durable local asset store, falling back to a read-only GitHub
//! mirror on cache miss.

use keydir_cache::AssetStore;
use keydir_proxy::error::{ProxyError, Result};
use keydir_proxy::fetch::MirrorFetcher;
use keydir_proxy::server::{start_server, ServerState, SharedState};
use keydir_proxy::types::{self, ProxyConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let env_filter = EnvFilter::from_default_env().add_directive("keydir_proxy=info".parse()?);

    // Use JSON format for GCP Cloud Logging when LOG_FORMAT=json
    if std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false)
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_stackdriver::layer())
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    };

    info!("Starting Keydir Proxy...");

    // Load configuration from environment
    let config = load_config();
    info!("Port: {}", config.port);
    info!("Cache dir: {:?}", config.cache_dir);
    info!("Root object: {:?}", config.root_object);
    info!("Mirror base: {}", config.mirror_base);
    match &config.allowed_hosts {
        Some(hosts) => info!("Allowed hosts: {}", hosts.join(", ")),
        None => info!("Allowed hosts: (unrestricted)"),
    }

    // Create the asset store and mirror fetcher
    let store = AssetStore::new(config.cache_dir.clone());
    store.init().await?;

    let fetcher = MirrorFetcher::new(config.mirror_base.clone())?;

    // Create shared state
    let port = config.port;
    let state: SharedState = Arc::new(ServerState::new(config, store, fetcher));

    // Start HTTP server (blocking)
    start_server(state, port)
        .await
        .map_err(|e| ProxyError::Config(format!("Server error: {}", e)))?;

    Ok(())
}

fn load_config() -> ProxyConfig {
    let port = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(8080);

    let cache_dir = std::env::var("CACHE_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./cache/assets"));

    let root_object = std::env::var("ROOT_OBJECT")
        .unwrap_or_else(|_| types::DEFAULT_ROOT_OBJECT.to_string());

    // Keys carry their own leading slash, so the base never ends in one.
    let mirror_base = std::env::var("GITHUB_MIRROR_BASE")
        .unwrap_or_else(|_| types::DEFAULT_MIRROR_BASE.to_string())
        .trim_end_matches('/')
        .to_string();

    let allowed_hosts = std::env::var("ALLOWED_HOSTS")
        .ok()
        .and_then(|raw| types::parse_allowed_hosts(&raw));

    ProxyConfig {
        port,
        cache_dir,
        root_object,
        mirror_base,
        allowed_hosts,
    }
}
