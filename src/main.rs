use anyhow::Context;
use config::{db, logger::initialize_logger, session::init_session, startup::AppState};
use tracing::info;

mod app;
mod config;
mod controllers;
mod dtos;
mod error;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod utils;

#[cfg(test)]
mod tests;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    initialize_logger();

    info!("🚀 Server starting initialization...");

    let db = db::init_database()
        .await
        .context("Failed to initialize database")?;

    let app_state = AppState::new();

    let app = app::create_app(db, app_state, init_session());

    let listener = tokio::net::TcpListener::bind("0.0.0.0:9000")
        .await
        .context("Failed to bind port 9000")?;
    info!("🚀 Server started successfully at port 9000");
    axum::serve(listener, app).await?;
    Ok(())
}
