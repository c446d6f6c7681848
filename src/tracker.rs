//! Tracks one scoreboard URL and holds the latest parsed snapshot.
//!
//! The background worker and request handlers both refresh through the same
//! tracker. Each refresh fetches and parses without holding a lock, then swaps
//! the snapshot `Arc` in a single assignment; the last writer wins.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::api::TitleSource;
use crate::error::{Result, TrackerError};
use crate::models::MatchStateRecord;
use crate::parser;

pub struct ScoreTracker<S> {
    source: S,
    target: RwLock<Option<String>>,
    snapshot: RwLock<Option<Arc<MatchStateRecord>>>,
    auto_update: AtomicBool,
}

impl<S: TitleSource> ScoreTracker<S> {
    pub fn new(source: S, auto_update: bool) -> Self {
        Self {
            source,
            target: RwLock::new(None),
            snapshot: RwLock::new(None),
            auto_update: AtomicBool::new(auto_update),
        }
    }

    /// Track a new URL and fetch its first snapshot.
    ///
    /// The URL stays set when the initial fetch fails so the background
    /// worker can retry it.
    pub async fn set_target(&self, url: &str) -> Result<Arc<MatchStateRecord>> {
        let url = url.trim();
        if url.is_empty() {
            return Err(TrackerError::MissingUrl);
        }

        *self.target.write().await = Some(url.to_string());
        info!("Tracking match: {}", url);

        self.fetch_and_store(url).await
    }

    pub async fn target(&self) -> Option<String> {
        self.target.read().await.clone()
    }

    /// Fetch the tracked URL and replace the snapshot
    pub async fn refresh_now(&self) -> Result<Arc<MatchStateRecord>> {
        let url = self.target().await.ok_or(TrackerError::NoTargetSet)?;
        self.fetch_and_store(&url).await
    }

    /// Fetch `url`, or the tracked URL when `None`, without changing the target
    pub async fn refresh_from(&self, url: Option<&str>) -> Result<Arc<MatchStateRecord>> {
        match url.map(str::trim).filter(|u| !u.is_empty()) {
            Some(url) => self.fetch_and_store(url).await,
            None => self.refresh_now().await,
        }
    }

    /// Fresh snapshot if the page can be fetched, otherwise the stored one
    pub async fn current_score(&self) -> Result<Arc<MatchStateRecord>> {
        match self.refresh_now().await {
            Ok(record) => Ok(record),
            Err(TrackerError::NoTargetSet) => Err(TrackerError::NoTargetSet),
            Err(e) => {
                warn!("Serving stored snapshot after failed refresh: {}", e);
                self.stored_snapshot().await.ok_or(TrackerError::NoSnapshot)
            }
        }
    }

    /// Stored snapshot without fetching
    pub async fn snapshot(&self) -> Result<Arc<MatchStateRecord>> {
        if self.target.read().await.is_none() {
            return Err(TrackerError::NoTargetSet);
        }
        self.stored_snapshot().await.ok_or(TrackerError::NoSnapshot)
    }

    pub fn auto_update(&self) -> bool {
        self.auto_update.load(Ordering::Relaxed)
    }

    pub fn set_auto_update(&self, enabled: bool) {
        self.auto_update.store(enabled, Ordering::Relaxed);
        info!("Auto-update {}", if enabled { "resumed" } else { "paused" });
    }

    /// Flip auto-update and return the new value
    pub fn toggle_auto_update(&self) -> bool {
        let enabled = !self.auto_update.fetch_xor(true, Ordering::Relaxed);
        info!("Auto-update {}", if enabled { "resumed" } else { "paused" });
        enabled
    }

    async fn stored_snapshot(&self) -> Option<Arc<MatchStateRecord>> {
        self.snapshot.read().await.clone()
    }

    async fn fetch_and_store(&self, url: &str) -> Result<Arc<MatchStateRecord>> {
        let title = match self.source.fetch_title(url).await {
            Ok(title) => title,
            Err(e) => {
                warn!("Failed to fetch scoreboard {}: {}", url, e);
                return Err(e);
            }
        };

        let record = Arc::new(parser::parse_title(&title));
        *self.snapshot.write().await = Some(Arc::clone(&record));

        Ok(record)
    }
}

/// Log a snapshot the way the console feed shows it
pub fn log_match_update(record: &MatchStateRecord) {
    info!(
        "Match update at {} | {} | {}",
        record.fetched_at.format("%Y-%m-%d %H:%M:%S"),
        record.phase.as_str(),
        record.score_line
    );

    for batter in record.active_batters() {
        info!(
            "  At the crease: {} {}({}) SR: {}",
            batter.name, batter.runs, batter.balls_faced, batter.strike_rate
        );
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;

    use super::*;
    use crate::models::MatchPhase;

    /// Title source answering from a per-URL queue; an empty queue fails
    #[derive(Default)]
    pub(crate) struct FakeSource {
        titles: Mutex<HashMap<String, VecDeque<String>>>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeSource {
        pub(crate) fn with(url: &str, titles: &[&str]) -> Self {
            let source = Self::default();
            source.push(url, titles);
            source
        }

        pub(crate) fn push(&self, url: &str, titles: &[&str]) {
            self.titles
                .lock()
                .unwrap()
                .entry(url.to_string())
                .or_default()
                .extend(titles.iter().map(|t| t.to_string()));
        }

        pub(crate) fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl TitleSource for FakeSource {
        async fn fetch_title(&self, url: &str) -> Result<String> {
            self.calls.lock().unwrap().push(url.to_string());
            self.titles
                .lock()
                .unwrap()
                .get_mut(url)
                .and_then(|queue| queue.pop_front())
                .ok_or_else(|| TrackerError::EmptyTitle {
                    url: url.to_string(),
                })
        }
    }

    const URL: &str = "https://crex.example/scoreboard/rcb-vs-csk";
    const LIVE: &str = "RCB 120-3 (12.3) (Kohli 45(30), Maxwell 20(15)) vs CSK";
    const LATER: &str = "RCB 150-4 (15.0) (Kohli 60(40), Patidar 10(8)) vs CSK";

    #[tokio::test]
    async fn test_requests_before_target_report_not_configured() {
        let tracker = ScoreTracker::new(FakeSource::default(), true);

        assert!(matches!(tracker.snapshot().await, Err(TrackerError::NoTargetSet)));
        assert!(matches!(tracker.refresh_now().await, Err(TrackerError::NoTargetSet)));
        assert!(matches!(tracker.current_score().await, Err(TrackerError::NoTargetSet)));
        assert!(matches!(tracker.refresh_from(None).await, Err(TrackerError::NoTargetSet)));
        assert!(tracker.source.calls().is_empty());
    }

    #[tokio::test]
    async fn test_set_target_fetches_initial_snapshot() {
        let tracker = ScoreTracker::new(FakeSource::with(URL, &[LIVE]), true);

        let record = tracker.set_target(&format!("  {}  ", URL)).await.unwrap();

        assert_eq!(record.phase, MatchPhase::Live);
        assert_eq!(record.team1.runs, 120);
        assert_eq!(tracker.target().await.as_deref(), Some(URL));
        assert_eq!(*tracker.snapshot().await.unwrap(), *record);
    }

    #[tokio::test]
    async fn test_set_target_rejects_blank_url() {
        let tracker = ScoreTracker::new(FakeSource::default(), true);

        assert!(matches!(tracker.set_target("   ").await, Err(TrackerError::MissingUrl)));
        assert!(tracker.target().await.is_none());
    }

    #[tokio::test]
    async fn test_failed_initial_fetch_keeps_target() {
        let tracker = ScoreTracker::new(FakeSource::default(), true);

        let err = tracker.set_target(URL).await.unwrap_err();

        assert!(err.is_fetch_error());
        assert_eq!(tracker.target().await.as_deref(), Some(URL));
        assert!(matches!(tracker.snapshot().await, Err(TrackerError::NoSnapshot)));
    }

    #[tokio::test]
    async fn test_refresh_replaces_snapshot() {
        let tracker = ScoreTracker::new(FakeSource::with(URL, &[LIVE, LATER]), true);
        tracker.set_target(URL).await.unwrap();

        let record = tracker.refresh_now().await.unwrap();

        assert_eq!(record.team1.runs, 150);
        assert_eq!(record.batters[1].name, "Patidar");
        assert_eq!(tracker.snapshot().await.unwrap().team1.runs, 150);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_snapshot() {
        let tracker = ScoreTracker::new(FakeSource::with(URL, &[LIVE]), true);
        let first = tracker.set_target(URL).await.unwrap();

        assert!(tracker.refresh_now().await.unwrap_err().is_fetch_error());

        let stored = tracker.snapshot().await.unwrap();
        assert!(Arc::ptr_eq(&stored, &first));
    }

    #[tokio::test]
    async fn test_current_score_falls_back_to_stored_snapshot() {
        let tracker = ScoreTracker::new(FakeSource::with(URL, &[LIVE, LATER]), true);
        tracker.set_target(URL).await.unwrap();

        assert_eq!(tracker.current_score().await.unwrap().team1.runs, 150);
        // queue exhausted, fetch fails
        assert_eq!(tracker.current_score().await.unwrap().team1.runs, 150);
    }

    #[tokio::test]
    async fn test_current_score_without_any_snapshot() {
        let tracker = ScoreTracker::new(FakeSource::default(), true);
        let _ = tracker.set_target(URL).await;

        assert!(matches!(tracker.current_score().await, Err(TrackerError::NoSnapshot)));
    }

    #[tokio::test]
    async fn test_refresh_from_other_url_keeps_target() {
        let other = "https://crex.example/scoreboard/mi-vs-kkr";
        let source = FakeSource::with(URL, &[LIVE]);
        source.push(other, &["MI won by 4 runs | KKR vs MI, Final"]);
        let tracker = ScoreTracker::new(source, true);
        tracker.set_target(URL).await.unwrap();

        let record = tracker.refresh_from(Some(other)).await.unwrap();

        assert_eq!(record.phase, MatchPhase::Ended);
        assert_eq!(record.short_title, "KKR vs MI");
        assert_eq!(tracker.target().await.as_deref(), Some(URL));
        assert_eq!(tracker.snapshot().await.unwrap().phase, MatchPhase::Ended);
        assert_eq!(tracker.source.calls(), vec![URL.to_string(), other.to_string()]);
    }

    #[tokio::test]
    async fn test_auto_update_toggle() {
        let tracker = ScoreTracker::new(FakeSource::default(), true);

        assert!(tracker.auto_update());
        assert!(!tracker.toggle_auto_update());
        assert!(!tracker.auto_update());
        assert!(tracker.toggle_auto_update());

        tracker.set_auto_update(false);
        assert!(!tracker.auto_update());
    }

    #[tokio::test]
    async fn test_concurrent_refreshes_leave_a_complete_snapshot() {
        let titles = vec![LIVE; 16];
        let tracker = Arc::new(ScoreTracker::new(FakeSource::with(URL, &titles), true));
        tracker.set_target(URL).await.unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let tracker = Arc::clone(&tracker);
                tokio::spawn(async move { tracker.refresh_now().await })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let stored = tracker.snapshot().await.unwrap();
        assert_eq!(stored.team1.runs, 120);
        assert_eq!(stored.batters[0].name, "Kohli");
    }
}
