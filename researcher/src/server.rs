use axum::{
    extract::{rejection::JsonRejection, State},
    http::{Method, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::any::Any;
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use crate::assistant::{
    configuration::Configuration,
    research::Researcher,
    state::{now_timestamp, DiagnosticInfo, HealthStatus, ResearchRequest, ResearchResult},
};

pub const HEALTH_MESSAGE: &str = "Healthcare AI Expert (Gemini Direct) is running!";

pub struct AppState {
    pub config: Configuration,
    pub researcher: Researcher,
}

impl AppState {
    pub fn new(config: Configuration, researcher: Researcher) -> Self {
        Self { config, researcher }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No JSON data provided")]
    NoJsonData,
    #[error("Failed to render page: {0}")]
    Render(#[from] std::io::Error),
    #[error("Endpoint not found")]
    NotFound { path: String },
    #[error("Method not allowed")]
    MethodNotAllowed { method: String, path: String },
    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        match self {
            ApiError::NoJsonData => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            ApiError::NotFound { path } => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": message, "path": path })),
            )
                .into_response(),
            ApiError::MethodNotAllowed { method, path } => (
                StatusCode::METHOD_NOT_ALLOWED,
                Json(json!({ "error": message, "method": method, "path": path })),
            )
                .into_response(),
            ApiError::Render(_) | ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": message })),
            )
                .into_response(),
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(serve_index).fallback(method_not_allowed))
        .route(
            "/api/research",
            get(handle_default_research)
                .post(handle_research)
                .fallback(method_not_allowed),
        )
        .route(
            "/health",
            get(health_check)
                .fallback(method_not_allowed)
                .layer(CatchPanicLayer::custom(unhealthy_response)),
        )
        .route("/test", get(test_endpoint).fallback(method_not_allowed))
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(internal_error_response))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run_server(config: Configuration, researcher: Researcher) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = Arc::new(AppState::new(config, researcher));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "Starting server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}

async fn serve_index(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let path = state.config.template_dir.join("index.html");
    let page = tokio::fs::read_to_string(&path).await.map_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "Failed to load index template");
        ApiError::Render(e)
    })?;
    Ok(Html(page))
}

async fn handle_research(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ResearchResult>, ApiError> {
    let Json(body) = payload.map_err(|rejection| {
        tracing::debug!(%rejection, "Rejected research request body");
        ApiError::NoJsonData
    })?;
    let request = ResearchRequest::from_json(body).ok_or_else(|| {
        tracing::debug!("Research request body is not a JSON object with a string query");
        ApiError::NoJsonData
    })?;

    let query = request.query_or_default();
    Ok(Json(state.researcher.run(&query).await))
}

async fn handle_default_research(State(state): State<Arc<AppState>>) -> Json<ResearchResult> {
    Json(state.researcher.run_default().await)
}

async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthStatus> {
    let api_status = if state.researcher.is_configured() {
        "healthy"
    } else {
        "unhealthy"
    };

    Json(HealthStatus {
        status: "healthy".to_string(),
        message: HEALTH_MESSAGE.to_string(),
        api_status: api_status.to_string(),
        timestamp: now_timestamp(),
    })
}

async fn test_endpoint(State(state): State<Arc<AppState>>) -> Json<DiagnosticInfo> {
    Json(DiagnosticInfo {
        message: "Test endpoint working!".to_string(),
        timestamp: now_timestamp(),
        environment: state.config.environment.as_str().to_string(),
    })
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound {
        path: uri.path().to_string(),
    }
}

async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    ApiError::MethodNotAllowed {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
}

fn panic_message(err: &(dyn Any + Send)) -> String {
    if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    }
}

fn internal_error_response(err: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!(panic = %panic_message(err.as_ref()), "Handler panicked");
    ApiError::Internal.into_response()
}

fn unhealthy_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = panic_message(err.as_ref());
    tracing::error!(panic = %message, "Health check panicked");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "status": "unhealthy", "error": message })),
    )
        .into_response()
}
