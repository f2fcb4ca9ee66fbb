use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fleetreg_api::config::{EventConfig, ServerConfig, StorageBackend};
use fleetreg_api::router::build_app_router;
use fleetreg_api::state::AppState;
use fleetreg_core::publisher::{EventPublisher, NoopPublisher};
use fleetreg_core::repository::VehicleRepository;
use fleetreg_core::MemoryVehicleRepository;
use fleetreg_db::{DbPool, PgVehicleRepository};
use fleetreg_events::WebhookPublisher;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fleetreg_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Event publisher ---
    let event_config = EventConfig::from_env();
    let publisher: Arc<dyn EventPublisher> = match &event_config.webhook_url {
        Some(url) => {
            tracing::info!(endpoint = %url, "Creation events will be delivered via webhook");
            Arc::new(WebhookPublisher::new(url.clone()))
        }
        None => {
            tracing::warn!("EVENT_WEBHOOK_URL not set, creation events will not be delivered");
            Arc::new(NoopPublisher)
        }
    };

    // --- Storage ---
    let (repo, pool): (Arc<dyn VehicleRepository>, Option<DbPool>) =
        match StorageBackend::from_env() {
            StorageBackend::Postgres => {
                let database_url =
                    std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

                let pool = fleetreg_db::create_pool(&database_url)
                    .await
                    .expect("Failed to connect to database");
                tracing::info!("Database connection pool created");

                fleetreg_db::health_check(&pool)
                    .await
                    .expect("Database health check failed");
                tracing::info!("Database health check passed");

                fleetreg_db::run_migrations(&pool)
                    .await
                    .expect("Failed to run database migrations");
                tracing::info!("Database migrations applied");

                (Arc::new(PgVehicleRepository::new(pool.clone())), Some(pool))
            }
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory storage, records will not survive a restart");
                (Arc::new(MemoryVehicleRepository::new()), None)
            }
        };

    // --- App state & router ---
    let state = AppState::new(repo, publisher, pool);
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server shuts
/// down cleanly whether stopped interactively or by a process manager.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
