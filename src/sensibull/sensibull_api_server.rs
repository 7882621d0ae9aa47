use super::browser::{BrowserSession, WebDriverSession};
use super::charts::ChartRenderer;
use super::config;
use super::models::ChainSnapshot;
use super::processor::run_cycle;
use crate::error::ScrapeError;
use crate::utility::timing::Timer;
use anyhow::{Context, Result};
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::get,
};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::{error, info, warn};

// -----------------------------------------------
// API RESPONSE MODELS
// -----------------------------------------------

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub processing_time_ms: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub mode: String,
    pub page_url: String,
    pub started_at: DateTime<Local>,
}

// -----------------------------------------------
// APPLICATION STATE
// -----------------------------------------------

/// Shared state for every request.
///
/// The session mutex also guards the chart files: a cycle holds it from the
/// page refresh until both images are written.
pub struct AppState<B> {
    session: Arc<Mutex<B>>,
    renderer: Arc<dyn ChartRenderer>,
    output_dir: Arc<PathBuf>,
    page_url: Arc<String>,
    mode: Arc<String>,
    started_at: DateTime<Local>,
}

impl<B> Clone for AppState<B> {
    fn clone(&self) -> Self {
        Self {
            session: Arc::clone(&self.session),
            renderer: Arc::clone(&self.renderer),
            output_dir: Arc::clone(&self.output_dir),
            page_url: Arc::clone(&self.page_url),
            mode: Arc::clone(&self.mode),
            started_at: self.started_at,
        }
    }
}

impl<B: BrowserSession> AppState<B> {
    pub fn new(
        session: Arc<Mutex<B>>,
        renderer: Arc<dyn ChartRenderer>,
        output_dir: PathBuf,
        page_url: String,
    ) -> Self {
        Self {
            session,
            renderer,
            output_dir: Arc::new(output_dir),
            page_url: Arc::new(page_url),
            mode: Arc::new(config::DEFAULT_MODE.to_string()),
            started_at: Local::now(),
        }
    }

    /// Execution mode reported by `/api/health`
    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Arc::new(mode.into());
        self
    }

    /// Run one cycle while holding the session lock
    async fn refresh(&self) -> std::result::Result<ChainSnapshot, ScrapeError> {
        let session = self.session.lock().await;
        run_cycle(&*session, self.renderer.as_ref(), &self.output_dir).await
    }
}

fn log_cycle_failure(err: &ScrapeError) {
    if err.is_no_data() {
        warn!(error = %err, "Cycle aborted, no charts rendered");
    } else {
        error!(error = %err, "Cycle failed");
    }
}

// -----------------------------------------------
// HANDLERS
// -----------------------------------------------

/// GET / - Refresh the page and show both charts
async fn oi_dashboard<B: BrowserSession + 'static>(State(app_state): State<AppState<B>>) -> Response {
    match app_state.refresh().await {
        Ok(snapshot) => Html(super::page::render_dashboard(&snapshot)).into_response(),
        Err(e) => {
            log_cycle_failure(&e);
            e.into_response()
        }
    }
}

/// GET /api/window - Refresh the page and return the selected window
async fn get_window<B: BrowserSession + 'static>(
    State(app_state): State<AppState<B>>,
) -> Result<Json<ApiResponse<ChainSnapshot>>, StatusCode> {
    let timer = Timer::silent("api window");

    match app_state.refresh().await {
        Ok(snapshot) => Ok(Json(ApiResponse {
            success: true,
            data: Some(snapshot),
            error: None,
            processing_time_ms: Some(timer.elapsed_ms()),
        })),
        Err(e) => {
            log_cycle_failure(&e);
            Ok(Json(ApiResponse {
                success: false,
                data: None,
                error: Some(e.to_string()),
                processing_time_ms: Some(timer.elapsed_ms()),
            }))
        }
    }
}

/// GET /api/health - Liveness, does not touch the browser
async fn get_health<B: BrowserSession + 'static>(
    State(app_state): State<AppState<B>>,
) -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse {
        success: true,
        data: Some(HealthResponse {
            mode: app_state.mode.to_string(),
            page_url: app_state.page_url.to_string(),
            started_at: app_state.started_at,
        }),
        error: None,
        processing_time_ms: None,
    })
}

// -----------------------------------------------
// SERVER SETUP
// -----------------------------------------------

pub fn build_router<B: BrowserSession + 'static>(app_state: AppState<B>) -> Router {
    let static_files = ServeDir::new(app_state.output_dir.as_ref());

    Router::new()
        .route("/", get(oi_dashboard::<B>))
        .route("/api/window", get(get_window::<B>))
        .route("/api/health", get(get_health::<B>))
        .nest_service("/static", static_files)
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for Ctrl-C");
    }
    info!("Shutdown requested");
}

/// Serve the dashboard until Ctrl-C, then close the browser session
pub async fn start_server(
    port: u16,
    mode: &str,
    session: WebDriverSession,
    renderer: Arc<dyn ChartRenderer>,
    output_dir: PathBuf,
) -> Result<()> {
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output dir {}", output_dir.display()))?;

    let page_url = session.page_url().to_string();
    let session = Arc::new(Mutex::new(session));
    let app_state =
        AppState::new(Arc::clone(&session), renderer, output_dir, page_url).with_mode(mode);
    let app = build_router(app_state);

    let addr = format!("127.0.0.1:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    println!("🚀 OI Server running on http://{}", addr);
    println!("📋 Available endpoints:");
    println!("   GET  /              (refresh + charts)");
    println!("   GET  /api/window");
    println!("   GET  /api/health");
    println!("   GET  /static/<chart>.svg");
    println!();

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    match Arc::try_unwrap(session) {
        Ok(session) => session.into_inner().close().await?,
        Err(_) => warn!("Browser session still shared at shutdown, leaving it open"),
    }

    Ok(())
}
