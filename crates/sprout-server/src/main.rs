#![forbid(unsafe_code)]

use sprout_server::{build_router, ApiConfig, AppState};
use sprout_store::{MemoryStore, SqliteStore};
use std::env;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| match v.as_str() {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(default)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if env_bool("SPROUT_LOG_JSON", false) {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    init_tracing();

    let bind_addr = env::var("SPROUT_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let defaults = ApiConfig::default();
    let config = ApiConfig {
        admin_password: env::var("SPROUT_ADMIN_PASSWORD").unwrap_or(defaults.admin_password),
        session_secret: env::var("SPROUT_SESSION_SECRET").unwrap_or(defaults.session_secret),
        session_ttl_secs: env_u64("SPROUT_SESSION_TTL_SECS", defaults.session_ttl_secs),
        max_body_bytes: env_usize("SPROUT_MAX_BODY_BYTES", defaults.max_body_bytes),
        recent_views_limit: env_usize("SPROUT_RECENT_VIEWS_LIMIT", defaults.recent_views_limit),
        popular_tags_limit: env_usize("SPROUT_POPULAR_TAGS_LIMIT", defaults.popular_tags_limit),
    };

    // SPROUT_DB_PATH unset means an in-memory store; fine for demos,
    // everything vanishes on restart.
    let store: Arc<dyn sprout_store::ContentStore> = match env::var("SPROUT_DB_PATH") {
        Ok(path) => {
            let store = SqliteStore::open(Path::new(&path))
                .map_err(|e| format!("open {path} failed: {e}"))?;
            Arc::new(store)
        }
        Err(_) => Arc::new(MemoryStore::new()),
    };

    let state = AppState::new(store, config);
    let app = build_router(state);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| format!("bind {bind_addr} failed: {e}"))?;
    info!("sprout-server listening on {bind_addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .map_err(|e| format!("server failed: {e}"))
}
