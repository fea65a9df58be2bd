//! HTTP server initialization and runtime setup.
//!
//! Builds the configured storage backend, wires it into the registry, and
//! runs the Axum server until a shutdown signal arrives.

use crate::application::services::RegistryService;
use crate::config::{Config, StorageBackend};
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::persistence::{InMemoryLinkRepository, PgLinkRepository};
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::id_generator::RandomIdGenerator;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;

/// Storage handle owned by the server for the lifetime of the process.
///
/// Keeps the pool (if any) so it can be closed after the server drains.
pub struct Storage {
    pub repository: Arc<dyn LinkRepository>,
    pub pool: Option<PgPool>,
}

impl Storage {
    /// Opens the storage backend selected in `config`.
    ///
    /// For PostgreSQL this connects (with retry) and applies migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be reached or migrations fail.
    pub async fn open(config: &Config) -> Result<Self> {
        match config.storage_backend {
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory storage; links are lost on restart");
                Ok(Self {
                    repository: Arc::new(InMemoryLinkRepository::new()),
                    pool: None,
                })
            }
            StorageBackend::Postgres => {
                let pool = connect_database(config).await?;

                sqlx::migrate!("./migrations")
                    .run(&pool)
                    .await
                    .context("Failed to apply database migrations")?;
                tracing::info!("Database migrations applied");

                Ok(Self {
                    repository: Arc::new(PgLinkRepository::new(Arc::new(pool.clone()))),
                    pool: Some(pool),
                })
            }
        }
    }

    /// Releases storage resources.
    pub async fn close(self) {
        if let Some(pool) = self.pool {
            pool.close().await;
            tracing::info!("Database pool closed");
        }
    }
}

/// Connects to PostgreSQL with jittered exponential backoff.
///
/// # Errors
///
/// Returns the last connection error after `db_connect_retries` attempts.
pub async fn connect_database(config: &Config) -> Result<PgPool> {
    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL is not configured")?;

    let options = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime));

    let strategy = ExponentialBackoff::from_millis(100)
        .max_delay(Duration::from_secs(5))
        .map(jitter)
        .take(config.db_connect_retries.saturating_sub(1));

    let pool = Retry::spawn(strategy, || {
        let options = options.clone();
        async move {
            options.connect(database_url).await.inspect_err(|e| {
                tracing::warn!("Database connection attempt failed: {}", e);
            })
        }
    })
    .await
    .context("Failed to connect to database")?;

    tracing::info!("Connected to database");
    Ok(pool)
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Storage backend (PostgreSQL pool + migrations, or in-memory)
/// - Registry service with a random identifier generator
/// - Axum HTTP server with graceful shutdown
///
/// The storage handle is injected into the registry, never held globally,
/// and is closed once the server has drained.
///
/// # Errors
///
/// Returns an error if:
/// - Storage initialization fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let storage = Storage::open(&config).await?;

    let registry = Arc::new(RegistryService::new(
        storage.repository.clone(),
        Arc::new(RandomIdGenerator::new(config.short_id_length)),
        config.shorten_max_attempts,
    ));
    let state = AppState::new(registry);

    let app = NormalizePathLayer::trim_trailing_slash()
        .layer(app_router(state, &config.cors_allowed_origins));

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on http://{addr}");

    let served = axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await;

    storage.close().await;
    served?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves when Ctrl+C or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
