use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod application;
mod auth;
mod config;
mod models;
mod routes;
mod security;
#[cfg(test)]
mod test_support;

use adapters::Database;
use config::Settings;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub settings: Arc<Settings>,
}

#[derive(Parser)]
#[command(name = "campus-server")]
#[command(about = "Campus EdTech platform API server", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending migrations, then serve the HTTP API (default)
    Serve,
    /// Apply pending migrations and exit
    Migrate,
}

fn init_tracing(settings: &Settings) {
    let level = if settings.app_debug { "debug" } else { "info" };
    let sql_level = if settings.database.echo { "debug" } else { "warn" };
    let default_filter = format!("{level},sqlx::query={sql_level}");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::from_env().context("Invalid configuration")?;
    init_tracing(&settings);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => cmd_serve(settings).await,
        Commands::Migrate => cmd_migrate(settings).await,
    }
}

async fn cmd_migrate(settings: Settings) -> Result<()> {
    let db = Database::connect(&settings.database)
        .await
        .context("Failed to connect to the database")?;
    db.migrate()
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations completed");
    db.close().await;
    Ok(())
}

async fn cmd_serve(settings: Settings) -> Result<()> {
    tracing::info!(
        "{} initializing (env: {}, debug: {})",
        settings.app_name,
        settings.app_env,
        settings.app_debug
    );

    let db = Database::connect(&settings.database)
        .await
        .context("Failed to connect to the database")?;
    db.migrate()
        .await
        .context("Failed to run database migrations")?;
    tracing::info!("Database migrations completed");

    if settings.api_key.is_some() {
        tracing::info!("API key authentication enabled");
    } else {
        tracing::warn!("No API_KEY set - authentication disabled");
    }

    let address = settings.bind_address();
    let state = AppState {
        db: Arc::new(db),
        settings: Arc::new(settings),
    };
    let router = routes::app(state.clone());

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;

    tracing::info!("Swagger UI: http://{}/docs", address);
    tracing::info!("Listening on {}", address);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    state.db.close().await;
    tracing::info!("Database pool closed, bye");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
