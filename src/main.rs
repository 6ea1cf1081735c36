// src/main.rs

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use dotenvy::dotenv;
use fanportal::ai::{GeminiClient, GenerativeService};
use fanportal::config::{Config, StorageBackend};
use fanportal::quiz::{SessionRegistry, TRIVIA_QUESTIONS};
use fanportal::routes;
use fanportal::state::AppState;
use fanportal::utils::inflight::InFlight;
use fanportal::wall::{DocumentStorage, MemoryStorage, SqliteStorage, WallStore};
use sqlx::sqlite::SqlitePoolOptions;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

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

    // Initialize Storage with Retry
    let storage: Arc<dyn DocumentStorage> = match config.storage {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; the fan wall is lost on restart");
            Arc::new(MemoryStorage::new())
        }
        StorageBackend::Sqlite => Arc::new(connect_sqlite(&config).await),
    };

    let wall = WallStore::open(storage)
        .await
        .unwrap_or_else(|e| panic!("Failed to load the fan wall: {}", e));

    let quizzes = SessionRegistry::new(
        &TRIVIA_QUESTIONS,
        Duration::from_millis(config.quiz_advance_delay_ms),
        config.max_quiz_sessions,
    );

    let ai: Arc<dyn GenerativeService> = Arc::new(GeminiClient::from_config(&config));

    // Create AppState
    let state = AppState {
        config: config.clone(),
        wall: Arc::new(wall),
        quizzes: Arc::new(quizzes),
        ai,
        inflight: InFlight::new(),
    };

    // Create the Axum application router
    let app = routes::create_router(state);

    // Bind to the listening address
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Nestor fan portal listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| panic!("Failed to bind {}: {}", addr, e));

    // Start the server
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
    }
}

async fn connect_sqlite(config: &Config) -> SqliteStorage {
    let mut retry_count = 0;
    let pool = loop {
        match SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await
        {
            Ok(pool) => break pool,
            Err(e) => {
                retry_count += 1;
                if retry_count > 5 {
                    panic!("Failed to open database after 5 retries: {}", e);
                }
                tracing::warn!("Database not ready, retrying in 2s... (Attempt {})", retry_count);
                tokio::time::sleep(Duration::from_secs(2)).await;
            }
        }
    };

    tracing::info!("Database connected...");

    SqliteStorage::new(pool)
        .await
        .unwrap_or_else(|e| panic!("Failed to run database migrations: {}", e))
}
