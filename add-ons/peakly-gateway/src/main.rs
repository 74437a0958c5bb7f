//! Peakly Gateway: renders the energy optimizer page over HTTP.
//! Stateless; every request carries the three ratings it needs.

mod charts;
mod pages;

use axum::{
    body::Body,
    extract::{Form, Query, State},
    http::{header, Request},
    middleware::Next,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use peakly_core::{
    curve_rng, hourly_curve, render_comparison, today_label, AnalysisResult, MountPoint, PageMetadata, PeaklyConfig,
    Rating, RatingKind, Session, Trigger, WellnessRatings, COMPARISON_MOUNT_ID,
};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;
use tower_http::compression::CompressionLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub(crate) struct AppState {
    pub(crate) config: PeaklyConfig,
    pub(crate) metadata: PageMetadata,
}

impl AppState {
    fn new(config: PeaklyConfig) -> Self {
        let metadata = PageMetadata::new(config.site_url.clone());
        Self { config, metadata }
    }
}

/// Ratings as they arrive from a query string or form. Kept as raw pairs so a bad or
/// repeated value falls back instead of rejecting the request; the last value per field wins.
#[derive(Debug, Default, Deserialize)]
#[serde(from = "Vec<(String, String)>")]
struct RatingsParams {
    sleep_quality: Option<String>,
    mood: Option<String>,
    energy_level: Option<String>,
}

impl From<Vec<(String, String)>> for RatingsParams {
    fn from(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "sleep_quality" => params.sleep_quality = Some(value),
                "mood" => params.mood = Some(value),
                "energy_level" => params.energy_level = Some(value),
                _ => {}
            }
        }
        params
    }
}

impl RatingsParams {
    fn raw(&self, kind: RatingKind) -> Option<&str> {
        match kind {
            RatingKind::SleepQuality => self.sleep_quality.as_deref(),
            RatingKind::Mood => self.mood.as_deref(),
            RatingKind::EnergyLevel => self.energy_level.as_deref(),
        }
    }

    fn ratings(&self) -> WellnessRatings {
        let mut ratings = WellnessRatings::default();
        for kind in RatingKind::ALL {
            let Some(raw) = self.raw(kind) else { continue };
            let parsed = raw
                .trim()
                .parse::<i64>()
                .map_err(|e| e.to_string())
                .and_then(|v| Rating::try_from(v).map_err(|e| e.to_string()));
            match parsed {
                Ok(rating) => ratings.set(kind, rating),
                Err(error) => tracing::debug!(
                    field = kind.field_name(),
                    value = raw,
                    %error,
                    "invalid rating; using default"
                ),
            }
        }
        ratings
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = PeaklyConfig::load().map_err(|e| {
        tracing::error!(error = %e, "failed to load configuration");
        e
    })?;
    let addr = config.bind_addr();
    let state = Arc::new(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        tracing::error!(%addr, error = %e, "failed to bind");
        e
    })?;
    tracing::info!(
        %addr,
        compress = state.config.compress,
        optimize_css = state.config.optimize_css,
        version = peakly_core::version(),
        "Peakly gateway listening"
    );

    axum::serve(listener, app(state)).await?;
    Ok(())
}

fn app(state: Arc<AppState>) -> Router {
    let compress = state.config.compress;
    let router = Router::new()
        .route("/health", get(health))
        .route("/", get(serve_input))
        .route("/optimize", post(optimize_handler))
        .route("/results", get(serve_results))
        .route("/manifest.json", get(manifest_handler))
        .route("/static/peakly.css", get(stylesheet_handler))
        .with_state(state)
        .layer(axum::middleware::from_fn(log_request));
    if compress {
        router.layer(CompressionLayer::new())
    } else {
        router
    }
}

async fn log_request(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();
    let response = next.run(request).await;
    tracing::info!(
        %method,
        %path,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "request"
    );
    response
}

async fn health() -> &'static str {
    "OK"
}

/// Input mode. Query values, when present, preset the sliders.
async fn serve_input(State(state): State<Arc<AppState>>, Query(params): Query<RatingsParams>) -> Html<String> {
    let ratings = params.ratings();
    Html(pages::input_page(&state, &ratings, &today_label()))
}

/// POST /optimize: start the fixed analysis delay and show the indicator until it elapses.
async fn optimize_handler(State(state): State<Arc<AppState>>, Form(params): Form<RatingsParams>) -> Html<String> {
    let now = Instant::now();
    let mut session = Session::with_delay(params.ratings(), state.config.analysis_delay());
    let refresh_secs = match session.optimize(now) {
        Trigger::Started { ready_at } => ready_at.saturating_duration_since(now).as_millis().div_ceil(1000) as u64,
        Trigger::Ignored { .. } => 0,
    };
    tracing::info!(
        sleep_quality = session.ratings().sleep_quality.value(),
        mood = session.ratings().mood.value(),
        energy_level = session.ratings().energy_level.value(),
        refresh_secs,
        "analysis started"
    );
    Html(pages::analyzing_page(&state, session.ratings(), refresh_secs, &today_label()))
}

async fn serve_results(State(state): State<Arc<AppState>>, Query(params): Query<RatingsParams>) -> Html<String> {
    let result = AnalysisResult::from_ratings(params.ratings());
    let bars = hourly_curve(&result.ratings, &mut curve_rng(state.config.curve_seed));
    let mount = MountPoint::new(COMPARISON_MOUNT_ID);
    let radar = render_comparison(Some(&mount), None, &result.ratings);
    tracing::info!(score = result.score.value(), message = ?result.message, "results rendered");
    Html(pages::results_page(&state, &result, &bars, radar.as_ref(), &today_label()))
}

async fn manifest_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(state.metadata.web_manifest())
}

async fn stylesheet_handler() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], pages::STYLESHEET)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::StatusCode;
    use peakly_core::{html_escape, EnergyMessage};
    use tower::ServiceExt;

    fn state_with(config: PeaklyConfig) -> Arc<AppState> {
        Arc::new(AppState::new(config))
    }

    fn test_state() -> Arc<AppState> {
        state_with(PeaklyConfig { curve_seed: Some(7), ..PeaklyConfig::default() })
    }

    async fn get_body(state: Arc<AppState>, uri: &str) -> (StatusCode, String) {
        let response = app(state)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn health_is_ok() {
        let (status, body) = get_body(test_state(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");
    }

    #[tokio::test]
    async fn input_defaults_to_seven() {
        let (status, body) = get_body(test_state(), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("How are you feeling today?"));
        assert_eq!(body.matches(r#"value="7""#).count(), 3);
        assert!(body.contains("Optimize My Energy"));
        assert!(!body.contains("results-section"));
    }

    #[tokio::test]
    async fn input_presets_sliders_from_query() {
        let (_, body) = get_body(test_state(), "/?sleep_quality=3&mood=9&energy_level=6").await;
        assert!(body.contains(r#"name="sleep_quality" min="1" max="10" step="1" value="3""#));
        assert!(body.contains(r#"name="mood" min="1" max="10" step="1" value="9""#));
        assert!(body.contains(r#"name="energy_level" min="1" max="10" step="1" value="6""#));
    }

    #[tokio::test]
    async fn invalid_query_values_fall_back_to_default() {
        let (status, body) = get_body(test_state(), "/?sleep_quality=42&mood=abc").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.matches(r#"value="7""#).count(), 3);
    }

    #[tokio::test]
    async fn optimize_renders_analyzing_with_refresh() {
        let response = app(test_state())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/optimize")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("sleep_quality=8&mood=6&energy_level=9"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(body.contains("Analyzing your energy patterns..."));
        assert!(body.contains(r#"content="3;url=/results?sleep_quality=8&amp;mood=6&amp;energy_level=9""#));
        assert!(!body.contains("input-section"));
    }

    #[tokio::test]
    async fn results_show_score_message_and_charts() {
        let (status, body) = get_body(test_state(), "/results?sleep_quality=8&mood=6&energy_level=9").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("77%"));
        assert!(body.contains(&html_escape(EnergyMessage::Excellent.text())));
        assert!(body.contains(r#"id="energy-chart""#));
        assert!(body.contains(r#"id="comparison-chart""#));
        assert!(body.contains("Wind Down Time"));
        assert!(body.contains(r#"href="/?sleep_quality=8&amp;mood=6&amp;energy_level=9""#));
        assert!(!body.contains("analyzing-section"));
    }

    #[tokio::test]
    async fn seeded_results_are_reproducible() {
        let uri = "/results?sleep_quality=5&mood=5&energy_level=5";
        let (_, first) = get_body(test_state(), uri).await;
        let (_, second) = get_body(test_state(), uri).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn head_carries_metadata_and_scroll_restoration() {
        let (_, body) = get_body(test_state(), "/").await;
        assert!(body.contains("<title>Peakly - Daily Energy Calculator &amp; Boost Solutions | Increase Your Energy Levels</title>"));
        assert!(body.contains(r#"<link rel="canonical" href="https://peakly.com">"#));
        assert!(body.contains(r#"history.scrollRestoration = "auto";"#));
        assert!(body.contains(r#"href="/static/peakly.css""#));
    }

    #[tokio::test]
    async fn optimize_css_inlines_the_stylesheet() {
        let state = state_with(PeaklyConfig {
            optimize_css: true,
            scroll_restoration: false,
            ..PeaklyConfig::default()
        });
        let (_, body) = get_body(state, "/").await;
        assert!(body.contains("<style>"));
        assert!(!body.contains(r#"href="/static/peakly.css""#));
        assert!(body.contains(r#"history.scrollRestoration = "manual";"#));
    }

    #[tokio::test]
    async fn manifest_and_stylesheet_are_served() {
        let (status, body) = get_body(test_state(), "/manifest.json").await;
        assert_eq!(status, StatusCode::OK);
        let manifest: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert!(manifest.get("name").is_some());

        let response = app(test_state())
            .oneshot(Request::builder().uri("/static/peakly.css").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/css; charset=utf-8");
    }

    #[tokio::test]
    async fn repeated_rating_key_keeps_the_last_value() {
        let (status, body) = get_body(test_state(), "/?mood=3&mood=4").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"name="mood" min="1" max="10" step="1" value="4""#));
        assert!(body.contains(r#"name="sleep_quality" min="1" max="10" step="1" value="7""#));
    }

    #[tokio::test]
    async fn repeated_form_key_still_starts_analysis() {
        let response = app(test_state())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/optimize")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("sleep_quality=2&sleep_quality=9&mood=x&extra=1"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(body.contains("url=/results?sleep_quality=9&amp;mood=7&amp;energy_level=7"));
    }

    #[tokio::test]
    async fn header_date_is_localized_in_the_browser() {
        let (_, body) = get_body(test_state(), "/").await;
        assert!(body.contains(r#"<span class="date">"#));
        assert!(body.contains("toLocaleDateString('en-US', {weekday: 'long', year: 'numeric', month: 'long', day: 'numeric'})"));
    }

    async fn content_encoding(compress: bool) -> Option<String> {
        let state = state_with(PeaklyConfig { compress, ..PeaklyConfig::default() });
        let response = app(state)
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header(header::ACCEPT_ENCODING, "gzip")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        response
            .headers()
            .get(header::CONTENT_ENCODING)
            .map(|v| v.to_str().unwrap().to_string())
    }

    #[tokio::test]
    async fn compress_toggle_controls_gzip() {
        assert_eq!(content_encoding(true).await.as_deref(), Some("gzip"));
        assert_eq!(content_encoding(false).await, None);
    }
}
