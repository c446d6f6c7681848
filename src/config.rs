use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Scoreboard URL to start tracking immediately
    pub match_url: Option<String>,

    /// Interval in seconds between background refreshes
    pub update_interval: u64,

    /// Timeout in seconds for a single page fetch
    pub fetch_timeout: u64,

    /// Whether background refreshes start enabled
    pub auto_update: bool,

    /// Address the HTTP server binds to
    pub host: String,

    /// Port the HTTP server listens on
    pub port: u16,

    /// Static scoreboard page served at /live
    pub live_page: PathBuf,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            match_url: env::var("MATCH_URL")
                .ok()
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty()),

            update_interval: env::var("UPDATE_INTERVAL")
                .unwrap_or_else(|_| "15".to_string())
                .parse()
                .context("UPDATE_INTERVAL must be a valid number")?,

            fetch_timeout: env::var("FETCH_TIMEOUT")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("FETCH_TIMEOUT must be a valid number")?,

            auto_update: env::var("AUTO_UPDATE")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .context("AUTO_UPDATE must be true or false")?,

            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),

            port: env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .context("PORT must be a valid port number")?,

            live_page: env::var("LIVE_PAGE")
                .unwrap_or_else(|_| "index.html".to_string())
                .into(),
        })
    }
}
