use anyhow::Context;

use school_api_rust::app::{app, AppState};
use school_api_rust::config;
use school_api_rust::database::manager::DatabaseManager;
use school_api_rust::database::Store;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting School API in {:?} mode", config.environment);

    let pool = DatabaseManager::connect()
        .await
        .context("database connection failed")?;
    DatabaseManager::migrate(&pool).await?;

    let state = AppState {
        store: Store::postgres(pool),
    };
    let app = app(state);

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    println!("🚀 School API Rust server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
