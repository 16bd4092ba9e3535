//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, migrations, cache setup, and the Axum server
//! lifecycle including graceful shutdown.

use crate::application::services::{
    AuthService, BookingService, CarService, CatalogService, ContactService,
};
use crate::config::{Config, mask_connection_string};
use crate::infrastructure::cache::{CacheService, NullCache, RedisCache};
use crate::infrastructure::persistence::{
    MIGRATOR, PgAdminRepository, PgBookingRepository, PgCarRepository, PgContactRepository,
    PgOfferingRepository, PgTestimonialRepository,
};
use crate::routes::app_router;
use crate::state::AppState;

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

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool (retried with exponential backoff)
/// - Embedded migrations
/// - Redis cache (or NullCache fallback)
/// - Services and Axum HTTP server
///
/// Returns once a SIGINT or SIGTERM has been received and in-flight requests
/// have completed.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection fails after all retries
/// - Migrations fail
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_database(&config).await?;
    tracing::info!("Connected to database");

    MIGRATOR
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations applied");

    let cache = connect_cache(&config).await;
    let state = build_state(pool.clone(), cache, &config);

    let app = app_router(state, config.behind_proxy, &config.static_dir);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    pool.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

/// Opens the connection pool, retrying transient failures.
///
/// Waits 100ms, 200ms, 400ms... (capped at 10s, with jitter) between the
/// `DB_CONNECT_RETRIES` attempts, which covers databases that start
/// alongside the service.
async fn connect_database(config: &Config) -> Result<PgPool> {
    let options = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime));

    let strategy = ExponentialBackoff::from_millis(2)
        .factor(50)
        .max_delay(Duration::from_secs(10))
        .map(jitter)
        .take(config.db_connect_retries.saturating_sub(1));

    Retry::spawn(strategy, || {
        let options = options.clone();
        async move {
            options.connect(&config.database_url).await.inspect_err(|e| {
                tracing::warn!(
                    error = %e,
                    database = %mask_connection_string(&config.database_url),
                    "Database connection attempt failed"
                );
            })
        }
    })
    .await
    .context("Failed to connect to database")
}

/// Connects to Redis when configured, falling back to [`NullCache`].
async fn connect_cache(config: &Config) -> Arc<dyn CacheService> {
    let Some(redis_url) = &config.redis_url else {
        tracing::info!("Cache disabled (NullCache)");
        return Arc::new(NullCache::new());
    };

    match RedisCache::connect(redis_url, config.cache_ttl_seconds).await {
        Ok(redis) => {
            tracing::info!("Cache enabled (Redis)");
            Arc::new(redis)
        }
        Err(e) => {
            tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
            Arc::new(NullCache::new())
        }
    }
}

/// Wires PostgreSQL repositories into the application services.
pub fn build_state(pool: PgPool, cache: Arc<dyn CacheService>, config: &Config) -> AppState {
    let pool = Arc::new(pool);

    let car_service = CarService::new(
        Arc::new(PgCarRepository::new(pool.clone())),
        cache.clone(),
        Some(config.cache_ttl_seconds),
    );
    let catalog_service = CatalogService::new(
        Arc::new(PgOfferingRepository::new(pool.clone())),
        Arc::new(PgTestimonialRepository::new(pool.clone())),
    );
    let booking_service = BookingService::new(Arc::new(PgBookingRepository::new(pool.clone())));
    let contact_service = ContactService::new(Arc::new(PgContactRepository::new(pool.clone())));
    let auth_service = AuthService::new(
        Arc::new(PgAdminRepository::new(pool)),
        config.session_signing_secret.clone(),
        chrono::Duration::hours(config.session_ttl_hours),
    );

    AppState {
        car_service: Arc::new(car_service),
        catalog_service: Arc::new(catalog_service),
        booking_service: Arc::new(booking_service),
        contact_service: Arc::new(contact_service),
        auth_service: Arc::new(auth_service),
        cache,
    }
}

/// Resolves on SIGINT (Ctrl+C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
