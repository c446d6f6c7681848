//! Error types for fetching scoreboard pages and tracking a match.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Scoreboard page {url} returned status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Scoreboard page {url} has no title")]
    EmptyTitle { url: String },

    #[error("URL is required")]
    MissingUrl,

    #[error("No match URL set.")]
    NoTargetSet,

    #[error("No data available yet.")]
    NoSnapshot,
}

impl TrackerError {
    /// Whether the error came from fetching the upstream page
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            TrackerError::Request(_)
                | TrackerError::HttpStatus { .. }
                | TrackerError::EmptyTitle { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;
