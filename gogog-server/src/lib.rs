//! HTTP surface of the GoGoG learning backend.
//!
//! Routes:
//! - `GET /` welcome banner
//! - `GET /api/health`
//! - `POST /api/go/execute` run a Go snippet
//! - `GET /api/go/concepts/{name}` static concept lookup

pub mod concepts;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use gogog_exec::{CodeRunner, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::net::SocketAddr;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, info, warn};

use crate::concepts::{Concept, CONCEPT_NOT_FOUND};

pub const WELCOME_MESSAGE: &str = "Welcome to GoGoG - Interactive Go Learning Platform";

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },
    #[error("Server error: {0}")]
    Serve(std::io::Error),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServerError::InvalidBody(rejection) => (rejection.status(), self.to_string()),
            ServerError::Bind { .. } | ServerError::Serve(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ExecuteRequest {
    pub code: String,
}

/// Body of `POST /api/go/execute`; same shape as [`ExecutionResult`].
pub type ExecuteResponse = ExecutionResult;

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ConceptResponse {
    Found(&'static Concept),
    NotFound { error: &'static str },
}

#[derive(Clone)]
pub struct AppState {
    runner: CodeRunner,
}

pub fn create_app(runner: CodeRunner) -> Router {
    let state = AppState { runner };

    let cors = CorsLayer::permissive();

    Router::new()
        .route("/", get(root))
        .route("/api/health", get(health_check))
        .route("/api/go/execute", post(execute))
        .route("/api/go/concepts/{name}", get(get_concept))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Serve `app` on `addr` until Ctrl-C or SIGTERM.
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), ServerError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    info!("Starting GoGoG server on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
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
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutting down server...");
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": WELCOME_MESSAGE }))
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Execution failures are reported in the body with a 200; only an
/// unparseable body is an HTTP error.
async fn execute(
    State(state): State<AppState>,
    payload: Result<Json<ExecuteRequest>, JsonRejection>,
) -> Result<Json<ExecuteResponse>, ServerError> {
    let Json(payload) = payload?;
    debug!("Received execution request ({} bytes)", payload.code.len());

    let result = state.runner.execute_source(&payload.code).await;
    Ok(Json(result))
}

async fn get_concept(Path(name): Path<String>) -> Json<ConceptResponse> {
    match concepts::lookup(&name) {
        Some(concept) => Json(ConceptResponse::Found(concept)),
        None => {
            debug!("Unknown concept requested: {}", name);
            Json(ConceptResponse::NotFound {
                error: CONCEPT_NOT_FOUND,
            })
        }
    }
}
