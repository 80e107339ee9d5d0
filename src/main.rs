//! Arcade backend binary entrypoint wiring the REST routes, storage backends,
//! and CORS policy together.

use std::{env, net::SocketAddr};

use anyhow::Context;
use axum::{
    Router,
    http::{HeaderValue, Method, header},
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod dao;
mod dto;
mod error;
mod routes;
mod services;
mod state;

use config::AppConfig;
use state::{AppState, SharedState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load();
    let app_state = AppState::new(config.storage_policy());

    setup_storage(&app_state, &config).await;

    let app = build_router(app_state, &config);

    let port = env::var("PORT")
        .or_else(|_| env::var("SERVER_PORT"))
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    let service = app.into_make_service();
    axum::serve(listener, service)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    Ok(())
}

/// Connect the SQLite store according to the configured policy.
///
/// Under the fallback policy the connection is attempted once before serving;
/// if it fails the process is committed to the in-memory store for its whole
/// lifetime. Under the strict policy a supervisor task owns the connection
/// and keeps retrying in the background.
#[cfg(feature = "sqlite-store")]
async fn setup_storage(state: &SharedState, config: &AppConfig) {
    use std::sync::Arc;

    use config::StoragePolicy;
    use dao::user_store::{
        UserStore,
        sqlite::{SqliteConfig, SqliteUserStore},
    };

    let sqlite_config = SqliteConfig::new(config.database_path());

    match config.storage_policy() {
        StoragePolicy::Fallback => match SqliteUserStore::connect(sqlite_config).await {
            Ok(store) => state.install_primary(Arc::new(store)).await,
            Err(err) => {
                warn!(
                    error = %err,
                    "database unavailable at startup; serving from the in-memory fallback store"
                );
            }
        },
        StoragePolicy::Strict => {
            let supervised = state.clone();
            tokio::spawn(services::storage_supervisor::run(supervised, move || {
                let connect_config = sqlite_config.clone();
                async move {
                    SqliteUserStore::connect(connect_config)
                        .await
                        .map(|store| Arc::new(store) as Arc<dyn UserStore>)
                        .map_err(Into::into)
                }
            }));
        }
    }
}

/// Memory-only build: nothing to connect.
#[cfg(not(feature = "sqlite-store"))]
async fn setup_storage(_state: &SharedState, _config: &AppConfig) {
    warn!("built without a relational store; all data is volatile");
}

/// Build the top-level router and attach cross-cutting middleware layers.
fn build_router(state: SharedState, config: &AppConfig) -> Router<()> {
    routes::router(state)
        .layer(build_cors(config))
        .layer(TraceLayer::new_for_http())
}

/// CORS layer restricted to the configured origin, or permissive when none is
/// set. The restricted layer also answers browser preflight requests.
fn build_cors(config: &AppConfig) -> CorsLayer {
    let Some(origin) = config.allowed_origin() else {
        return CorsLayer::permissive();
    };

    match origin.parse::<HeaderValue>() {
        Ok(value) => CorsLayer::new()
            .allow_origin(value)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
            .allow_credentials(true),
        Err(err) => {
            warn!(origin, error = %err, "invalid allowed_origin; falling back to permissive CORS");
            CorsLayer::permissive()
        }
    }
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut term = signal(SignalKind::terminate()).expect("install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
