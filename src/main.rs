// src/main.rs

use std::net::SocketAddr;

use dotenvy::dotenv;
use simulados::catalog::Catalog;
use simulados::config::Config;
use simulados::routes;
use simulados::state::AppState;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily(&config.log_dir, "app.log");
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

    // Load the catalog once; it is read-only from here on
    let catalog = match &config.catalog_path {
        Some(path) => {
            tracing::info!("Loading catalog from {}", path);
            Catalog::from_json_file(path)
                .unwrap_or_else(|e| panic!("Failed to load catalog from {}: {}", path, e))
        }
        None => Catalog::builtin(),
    };
    tracing::info!(
        "Catalog ready: {} subjects, {} exam boards, {} mock questions",
        catalog.subjects().len(),
        catalog.exam_boards().len(),
        catalog.questions.len()
    );
    tracing::info!(
        "Scoring mode: {}, simulated latency: {}ms",
        config.scoring_mode.as_str(),
        config.simulated_latency_ms
    );

    let addr: SocketAddr = config
        .server_addr
        .parse()
        .expect("SERVER_ADDR must be a socket address like 0.0.0.0:3000");

    // Create AppState and the Axum application router
    let state = AppState::new(catalog, config);
    let app = routes::create_router(state);

    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listening address");

    // Start the server
    axum::serve(listener, app).await.expect("Server error");
}
