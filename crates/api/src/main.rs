use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use notekeeper_api::config::{ServerConfig, StoreKind};
use notekeeper_api::router::build_app_router;
use notekeeper_api::state::AppState;
use notekeeper_core::memory::InMemoryNoteRepository;
use notekeeper_core::repository::NoteRepository;
use notekeeper_core::service::NoteService;
use notekeeper_db::repositories::PgNoteRepository;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "notekeeper_api=debug,notekeeper_core=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env().expect("Invalid server configuration");
    tracing::info!(
        host = %config.host,
        port = %config.port,
        store = ?config.store,
        "Loaded server configuration"
    );

    // --- Note store ---
    let repository: Arc<dyn NoteRepository> = match config.store {
        StoreKind::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .expect("DATABASE_URL must be set");

            let pool = notekeeper_db::create_pool(database_url, config.database_max_connections)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            notekeeper_db::health_check(&pool)
                .await
                .expect("Database health check failed");
            tracing::info!("Database health check passed");

            notekeeper_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");

            Arc::new(PgNoteRepository::new(pool))
        }
        StoreKind::Memory => {
            tracing::warn!("Using in-memory note store; notes are lost on shutdown");
            Arc::new(InMemoryNoteRepository::new())
        }
    };

    // --- App state ---
    let state = AppState {
        notes: NoteService::new(repository),
        config: Arc::new(config.clone()),
    };

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

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
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
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
