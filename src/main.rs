//! PageKit demo server.
//!
//! Serves an in-memory catalog through the pagination middleware.

use tokio::net::TcpListener;
use tracing_subscriber::{EnvFilter, fmt};

use pagekit::{AppState, build_app};
use pagekit::catalog::Catalog;
use pagekit_core::config::AppConfig;
use pagekit_core::error::AppError;

#[tokio::main]
async fn main() {
    let env = std::env::var("PAGEKIT_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting PageKit v{}", env!("CARGO_PKG_VERSION"));

    let catalog = Catalog::sample();
    tracing::info!(books = catalog.len(), "Catalog loaded");

    let app = build_app(AppState::new(catalog), config.pagination.clone());

    let address = config.server.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {address}: {e}")))?;
    tracing::info!("Listening on {}", address);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("Server failed: {e}")))
}
