// Expense Tracker - Web Server
// Owns the store and hands it to the router and the daily summary

use anyhow::{Context, Result};
use expense_tracker::{app, spawn_daily, ExpenseStore, ServerConfig, VERSION};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = ServerConfig::default();

    // One store for the whole process, reset on restart
    let store = ExpenseStore::new();

    let _summary = spawn_daily(store.clone(), config.summary_time);
    info!(at = %config.summary_time, "daily summary scheduled");

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;

    let port = listener.local_addr()?.port();
    info!(version = VERSION, "Server running at http://localhost:{}", port);

    axum::serve(listener, app(store))
        .await
        .context("server stopped unexpectedly")?;

    Ok(())
}
