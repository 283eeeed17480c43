mod config;
mod routes;
mod services;
mod state;

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use crate::services::assets::{AssetHost, CloudinaryHost};
use crate::services::backend::HttpBackend;

const SESSION_SWEEP_PERIOD: Duration = Duration::from_secs(10 * 60);

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::ServerConfig::from_env().expect("invalid configuration");
    let backend = HttpBackend::new(&config.backend).expect("backend client init failed");

    // Uploads are optional: without an asset host the upload routes answer 503.
    let assets: Option<Arc<dyn AssetHost>> = match config.assets.clone() {
        Some(asset_config) => {
            let host = CloudinaryHost::new(asset_config).expect("asset client init failed");
            Some(Arc::new(host))
        }
        None => {
            tracing::warn!("asset host not configured; image uploads disabled");
            None
        }
    };

    let state = state::AppState::new(Arc::new(backend), assets, config.cookie_secure);
    state.sessions.spawn_sweeper(SESSION_SWEEP_PERIOD);
    let app = routes::leptos_app(state).expect("leptos app init failed");

    let port = config.port;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, backend = %config.backend.base_url, "fitness admin listening");
    axum::serve(listener, app).await.expect("server failed");
}
