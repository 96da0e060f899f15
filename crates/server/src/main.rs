use std::path::PathBuf;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

mod catalog;
mod config;
mod error;
mod routes;
mod storage;

use config::ServerConfig;
use storage::{DefaultsStore, SelectionLog};

#[derive(Clone)]
pub struct AppState {
    pub dental_dir: PathBuf,
    pub defaults: DefaultsStore,
    pub selections: SelectionLog,
}

fn router(state: AppState) -> Router {
    let artwork = ServeDir::new(&state.dental_dir);

    Router::new()
        .route("/api/health", get(routes::health))
        .route("/api/teeth", get(routes::list_teeth))
        .route("/api/defaults", get(routes::get_defaults))
        .route("/api/set-defaults", post(routes::set_defaults))
        .route("/api/selections", post(routes::save_selections))
        .nest_service(catalog::ARTWORK_ROUTE, artwork)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dental_server=info,tower_http=info".into()),
        )
        .init();

    let config = ServerConfig::from_env();
    let state = AppState {
        dental_dir: config.dental_dir.clone(),
        defaults: DefaultsStore::new(config.defaults_path.clone()),
        selections: SelectionLog::default(),
    };

    tracing::info!(
        "Serving artwork from {}, defaults at {}",
        config.dental_dir.display(),
        state.defaults.path().display()
    );

    let listener = match tokio::net::TcpListener::bind(config.bind_addr()).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Failed to bind {}: {e}", config.bind_addr());
            return;
        }
    };
    tracing::info!("Server running on http://localhost:{}", config.port);
    if let Err(e) = axum::serve(listener, router(state)).await {
        tracing::error!("Server error: {e}");
    }
}
