use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use srs_scheduler::{
    app,
    config::Config,
    data::{db, repositories::SqliteReviewStore},
    features::srs::ReviewService,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env()?;

    // Database configuration
    let pool = db::create_pool(&config.database_url, config.pool_size)
        .with_context(|| format!("Failed to open database {}", config.database_url))?;
    db::init_schema(&pool).context("Failed to create schema")?;

    let store = Arc::new(SqliteReviewStore::new(pool));
    let service = ReviewService::new(store, config.policy);
    log::info!("Scheduling policy: {}", service.policy());

    let app = app::build_router(service);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    log::info!("Server running on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
