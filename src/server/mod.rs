//! HTTP surface for the scoreboard client.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::{header, HeaderName, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeFile;
use tracing::info;

use crate::api::TitleSource;
use crate::error::TrackerError;
use crate::models::ScoreboardView;
use crate::tracker::{log_match_update, ScoreTracker};

type SharedTracker<S> = Arc<ScoreTracker<S>>;

const NO_CACHE_HEADERS: [(HeaderName, &str); 3] = [
    (header::CACHE_CONTROL, "no-cache, no-store, must-revalidate"),
    (header::PRAGMA, "no-cache"),
    (header::EXPIRES, "0"),
];

#[derive(Debug, Deserialize)]
struct SetUrlRequest {
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ScrapeParams {
    url: Option<String>,
}

/// Build the router serving the tracker API and the static scoreboard page
pub fn router<S: TitleSource + 'static>(tracker: SharedTracker<S>, live_page: &Path) -> Router {
    Router::new()
        .route("/healthcheck", get(healthcheck))
        .route("/api/status", get(status::<S>))
        .route("/api/set-url", post(set_url::<S>))
        .route("/api/current-score", get(current_score::<S>))
        .route("/api/snapshot", get(snapshot::<S>))
        .route("/api/scrape", get(scrape::<S>))
        .route("/api/toggle-auto-update", post(toggle_auto_update::<S>))
        .route_service("/live", ServeFile::new(live_page))
        .layer(create_cors_layer())
        .with_state(tracker)
}

fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600))
}

impl IntoResponse for TrackerError {
    fn into_response(self) -> Response {
        let status = match &self {
            TrackerError::MissingUrl | TrackerError::NoTargetSet => StatusCode::BAD_REQUEST,
            TrackerError::NoSnapshot => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        error_response(status, &self.to_string())
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

async fn healthcheck() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn status<S: TitleSource>(State(tracker): State<SharedTracker<S>>) -> impl IntoResponse {
    Json(json!({
        "url": tracker.target().await,
        "auto_update": tracker.auto_update(),
    }))
}

async fn set_url<S: TitleSource>(
    State(tracker): State<SharedTracker<S>>,
    Json(req): Json<SetUrlRequest>,
) -> Response {
    match tracker.set_target(req.url.as_deref().unwrap_or_default()).await {
        Ok(record) => {
            log_match_update(&record);
            Json(json!({
                "message": "URL set successfully",
                "initial_data": ScoreboardView::from(record.as_ref()),
            }))
            .into_response()
        }
        Err(e) if e.is_fetch_error() => {
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to scrape initial data")
        }
        Err(e) => e.into_response(),
    }
}

async fn current_score<S: TitleSource>(State(tracker): State<SharedTracker<S>>) -> Response {
    match tracker.current_score().await {
        Ok(record) => (NO_CACHE_HEADERS, Json(ScoreboardView::from(record.as_ref()))).into_response(),
        Err(e) => (NO_CACHE_HEADERS, e.into_response()).into_response(),
    }
}

async fn snapshot<S: TitleSource>(State(tracker): State<SharedTracker<S>>) -> Response {
    match tracker.snapshot().await {
        Ok(record) => Json(ScoreboardView::from(record.as_ref())).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn scrape<S: TitleSource>(
    State(tracker): State<SharedTracker<S>>,
    Query(params): Query<ScrapeParams>,
) -> Response {
    match tracker.refresh_from(params.url.as_deref()).await {
        Ok(record) => {
            log_match_update(&record);
            Json(ScoreboardView::from(record.as_ref())).into_response()
        }
        Err(TrackerError::NoTargetSet) => error_response(
            StatusCode::BAD_REQUEST,
            "No match URL provided or set",
        ),
        Err(_) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Unable to scrape match data",
        ),
    }
}

async fn toggle_auto_update<S: TitleSource>(
    State(tracker): State<SharedTracker<S>>,
) -> impl IntoResponse {
    let enabled = tracker.toggle_auto_update();
    info!("Auto-update toggled via API: {}", enabled);
    Json(json!({ "auto_update": enabled }))
}
