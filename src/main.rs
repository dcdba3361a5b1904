// src/main.rs

use std::{net::SocketAddr, str::FromStr, sync::Arc, time::Duration};

use assessment_api::{
    airtable::AirtableClient,
    cache::{Cache, MemoryCache},
    config::Config,
    error::AppError,
    routes,
    state::AppState,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Load configuration from environment (.env included)
    let config = Config::from_env()?;

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    let connect_options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(3))
        .connect_with(connect_options)
        .await?;

    tracing::info!("Database connected...");

    // Run Migrations Automatically
    tracing::info!("Running migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| AppError::InternalServerError(format!("Failed to run migrations: {}", e)))?;
    tracing::info!("Migrations applied successfully.");

    let cache: Arc<dyn Cache> = if config.cache_ttl_seconds > 0 {
        Arc::new(MemoryCache::with_ttl(Duration::from_secs(config.cache_ttl_seconds)))
    } else {
        Arc::new(MemoryCache::new())
    };

    let content = Arc::new(AirtableClient::new(
        &config.airtable_api_url,
        &config.airtable_api_key,
        &config.airtable_base,
    ));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    let state = AppState {
        pool,
        config,
        content,
        cache,
    };

    // Create the Axum application router
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::InternalServerError(format!("Failed to bind {}: {}", addr, e)))?;
    tracing::info!("Listening on {}", addr);

    // Start the server
    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))
}
