mod config;
mod dto;
mod handlers;
mod models;
mod repository;
mod service;
mod views;

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use handlers::web;
use repository::Repository;
use service::NoteService;

#[tokio::main]
async fn main() {
    // Log setup
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "notes_web=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load config
    let cfg = config::load_config().unwrap_or_else(|e| {
        tracing::error!("Failed to load config: {e}");
        panic!("failed to locate or load config: {e}");
    });
    tracing::info!("Configured database: {:?}", cfg.database);

    // Repository and service creation
    let repo = Repository::new(&cfg.database);
    let service = Arc::new(NoteService::new(Arc::new(repo)));

    // The list page renders without a database, so a failed bootstrap is
    // logged and the server starts anyway.
    if service.bootstrap().await.is_err() {
        tracing::warn!("Starting without an initialized schema");
    }

    let router = web::router(service);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", cfg.port))
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to bind port {}: {e}", cfg.port);
            panic!("failed to bind port {}: {e}", cfg.port);
        });

    match listener.local_addr() {
        Ok(addr) => tracing::info!("Notes server starting, listening on {}", addr),
        Err(e) => tracing::warn!("Notes server starting, local address unknown: {e}"),
    }

    if let Err(e) = axum::serve(listener, router).await {
        tracing::error!("HTTP server error: {e}");
        panic!("failed to start HTTP server: {e}");
    }
}
