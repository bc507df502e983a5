//! Application lifecycle: logging, wiring, serving, maintenance commands.

use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use tokio::net::TcpListener;

use crate::config::{Command, Settings};
use crate::db;
use crate::repository::sqlite::AnalysisRepository;
use crate::routes;
use crate::service::{HttpFetcher, SeoService};

/// Initialize logging with tracing_subscriber.
pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new("info,sqlx=warn,tower_http=info,seo_optimizer=debug")
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .with_target(false)
        .with_ansi(true)
        .init();
}

/// Open the database and build the service once for the whole process.
pub async fn build_service(settings: &Settings) -> Result<(SeoService, SqlitePool)> {
    let pool = db::init_db(&settings.database)
        .await
        .context("failed to init db")?;

    let fetcher = HttpFetcher::new(settings.fetch_timeout(), &settings.user_agent)?;
    let service = SeoService::new(
        Arc::new(fetcher),
        Arc::new(AnalysisRepository::new(pool.clone())),
    );
    Ok((service, pool))
}

/// Run the selected command to completion.
pub async fn run(command: Command, settings: Settings) -> Result<()> {
    match command {
        Command::Serve => serve(&settings).await,
        Command::History { limit } => print_history(&settings, limit).await,
        Command::Clear => clear(&settings).await,
    }
}

/// Serve HTTP until ctrl-c.
pub async fn serve(settings: &Settings) -> Result<()> {
    let (service, pool) = build_service(settings).await?;

    let listener = TcpListener::bind(settings.bind)
        .await
        .context(format!("failed to bind {}", settings.bind))?;
    tracing::info!("SEO Optimizer listening on http://{}", listener.local_addr()?);

    axum::serve(listener, routes::router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Shutting down, closing database pool...");
    pool.close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

async fn print_history(settings: &Settings, limit: u32) -> Result<()> {
    let (service, pool) = build_service(settings).await?;
    let records = service.recent(limit).await?;

    if records.is_empty() {
        println!("No analyses recorded in {}", settings.database.display());
    }
    for record in &records {
        println!(
            "{:>5}  {:>3}  {}  {}  {}",
            record.id,
            record.score,
            record.created_at.to_rfc3339(),
            record.url,
            record.title
        );
    }

    pool.close().await;
    Ok(())
}

async fn clear(settings: &Settings) -> Result<()> {
    let (service, pool) = build_service(settings).await?;
    let deleted = service.clear_history().await?;
    println!("Deleted {} records from {}", deleted, settings.database.display());
    pool.close().await;
    Ok(())
}
