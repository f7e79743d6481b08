use std::net::SocketAddr;
use std::sync::Arc;

use notes_api::config::ServerConfig;
use notes_api::router::build_app_router;
use notes_api::state::AppState;
use notes_db::{DbPool, MemoryStore, PgStore, Store};
use tower_sessions_sqlx_store::PostgresStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "notes_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Storage and router ---
    let shared_config = Arc::new(config.clone());
    let app = match config.database_url.as_deref() {
        Some(database_url) => {
            let pool = open_pool(database_url).await;

            let sessions = PostgresStore::new(pool.clone());
            sessions
                .migrate()
                .await
                .expect("Failed to run session store migrations");
            tracing::info!("Session store ready");

            let store: Arc<dyn Store> = Arc::new(PgStore::new(pool));
            tracing::info!(backend = store.backend(), "Store ready");
            build_app_router(
                AppState {
                    store,
                    config: shared_config,
                },
                &config,
                sessions,
            )
        }
        None => {
            tracing::warn!("DATABASE_URL not set, notes and sessions are kept in memory only");
            let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
            tracing::info!(backend = store.backend(), "Store ready");
            build_app_router(
                AppState {
                    store,
                    config: shared_config,
                },
                &config,
                tower_sessions::MemoryStore::default(),
            )
        }
    };

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
        .with_graceful_shutdown(shutdown_signal(config.shutdown_timeout_secs))
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Connect to PostgreSQL, check it answers and apply the migrations.
async fn open_pool(database_url: &str) -> DbPool {
    let pool = notes_db::create_pool(database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    notes_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    notes_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    pool
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix). Once the signal
/// arrives, in-flight requests get `grace_secs` to finish before the
/// process exits.
async fn shutdown_signal(grace_secs: u64) {
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

    tokio::spawn(async move {
        tokio::time::sleep(std::time::Duration::from_secs(grace_secs)).await;
        tracing::warn!(grace_secs, "Shutdown grace period elapsed, exiting");
        std::process::exit(1);
    });
}
