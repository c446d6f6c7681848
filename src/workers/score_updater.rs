use std::sync::Arc;
use std::time::Duration;

use tokio::time;
use tracing::{debug, error, info};

use crate::api::TitleSource;
use crate::error::TrackerError;
use crate::tracker::{log_match_update, ScoreTracker};

/// Worker that periodically refreshes the tracked match
pub struct ScoreUpdaterWorker<S> {
    tracker: Arc<ScoreTracker<S>>,
    update_interval: Duration,
}

impl<S: TitleSource> ScoreUpdaterWorker<S> {
    /// Create a new score updater worker
    pub fn new(tracker: Arc<ScoreTracker<S>>, update_interval_secs: u64) -> Self {
        Self {
            tracker,
            update_interval: Duration::from_secs(update_interval_secs.max(1)),
        }
    }

    /// Run the worker loop
    pub async fn run(&self) {
        info!(
            "Score updater started (interval: {:?})",
            self.update_interval
        );

        let mut interval = time::interval(self.update_interval);
        interval.tick().await; // Skip first tick (initial fetch happens at startup)

        loop {
            interval.tick().await;
            self.update().await;
        }
    }

    /// Perform a single refresh cycle
    async fn update(&self) {
        if !self.tracker.auto_update() {
            debug!("Auto-update paused, skipping refresh");
            return;
        }

        info!("[Auto-Update] Fetching latest scores...");

        match self.tracker.refresh_now().await {
            Ok(record) => log_match_update(&record),
            Err(TrackerError::NoTargetSet) => {
                debug!("No match URL set, skipping refresh");
            }
            Err(e) => {
                error!("[Auto-Update] Failed to fetch scores: {}", e);
            }
        }
    }
}
