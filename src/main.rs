use std::env;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cricket_score_tracker::api::PageTitleClient;
use cricket_score_tracker::config::Config;
use cricket_score_tracker::server;
use cricket_score_tracker::tracker::{log_match_update, ScoreTracker};
use cricket_score_tracker::workers::ScoreUpdaterWorker;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cricket_score_tracker=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cricket score tracker");

    // Load configuration
    let config = Config::from_env()?;
    info!("Configuration loaded");

    // Initialize page client
    let client = PageTitleClient::new(Duration::from_secs(config.fetch_timeout))
        .context("Failed to build HTTP client")?;
    let tracker = Arc::new(ScoreTracker::new(client, config.auto_update));

    // Command line URL wins over MATCH_URL
    let match_url = env::args().nth(1).or_else(|| config.match_url.clone());
    match match_url {
        Some(url) => {
            info!("Fetching initial scores...");
            match tracker.set_target(&url).await {
                Ok(record) => log_match_update(&record),
                Err(e) => warn!("Initial fetch failed, will retry: {}", e),
            }
        }
        None => info!("No URL provided. Set it via POST /api/set-url"),
    }

    // Create worker
    let score_updater = ScoreUpdaterWorker::new(Arc::clone(&tracker), config.update_interval);
    let updater_handle = tokio::spawn(async move {
        score_updater.run().await;
    });

    // Web server
    let router = server::router(Arc::clone(&tracker), &config.live_page);
    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", config.host, config.port))?;

    info!("Server running: http://{}:{}", config.host, config.port);
    info!("View scoreboard at: http://localhost:{}/live", config.port);
    if let Some(url) = tracker.target().await {
        info!("Tracking: {}", url);
    }

    let server_handle = tokio::spawn(async move { axum::serve(listener, router).await });

    // Wait for shutdown signal
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        result = updater_handle => {
            error!("Score updater exited unexpectedly: {:?}", result);
        }
        result = server_handle => {
            error!("Web server exited unexpectedly: {:?}", result);
        }
    }

    info!("Server stopped");
    Ok(())
}
