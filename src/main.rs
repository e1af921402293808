//! PropDesk Backend Server
//!
//! REST backend for the property-management app: accounts, password reset
//! and property setup.

use anyhow::Context;
use axum::http::{HeaderValue, Method};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};

use propdesk_server::auth::{AccountService, TokenSettings};
use propdesk_server::config::Config;
use propdesk_server::mail::HttpMailer;
use propdesk_server::state::AppState;
use propdesk_server::store::PgStore;
use propdesk_server::upload::UploadDir;
use propdesk_server::{db, routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!(environment = config.environment.as_str(), "Starting PropDesk");

    let db_pool = db::create_pool(&config).await?;
    db::run_migrations(&db_pool).await?;
    let store = Arc::new(PgStore::new(db_pool));

    let mailer = Arc::new(HttpMailer::new(&config.mail).context("building mail client")?);

    let uploads = UploadDir::create(&config.upload_dir)
        .await
        .with_context(|| format!("creating upload directory {}", config.upload_dir.display()))?;

    let account_service = Arc::new(AccountService::new(
        store.clone(),
        mailer,
        TokenSettings {
            secret: config.jwt_secret.clone(),
            access_ttl_seconds: config.jwt_access_token_ttl_seconds,
            reset_ttl_seconds: config.reset_token_ttl_seconds,
        },
        config.mail.reset_link_base.clone(),
    ));

    let app_state = AppState::new(account_service, store.clone(), store, uploads);

    let app = routes::app(app_state, config.max_upload_bytes)
        .layer(configure_cors(config.cors_allowed_origins.as_deref()));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Health check at http://{}/health", addr);

    // Serve with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

fn configure_cors(allowed_origins: Option<&str>) -> CorsLayer {
    let allowed_origins = allowed_origins.unwrap_or_default();

    if allowed_origins.trim().is_empty() {
        tracing::warn!("CORS_ALLOWED_ORIGINS not set, allowing all origins (permissive)");
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .split(',')
        .filter_map(|s| s.trim().parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
