use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use go_exec::{CommandOutput, GoExecutor};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::{net::SocketAddr, time::Duration};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Execution error: {0}")]
    ExecutionError(#[from] go_exec::Error),
    #[error("Server error: {0}")]
    ServerError(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            // Toolchain diagnostics travel inside CommandOutput; an Err
            // here means the host itself failed (fs, spawn, missing go).
            ServerError::ExecutionError(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
            ServerError::ServerError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ExecuteRequest {
    /// Go source to compile and run.
    pub code: String,
    /// Optional Go import paths to fetch before running.
    pub packages: Option<Vec<String>>,
    /// Per-command time ceiling in seconds.
    pub timeout: Option<u64>,
}

#[derive(Clone)]
pub struct AppState {
    default_timeout: Duration,
}

pub fn create_app(default_timeout: Duration) -> Router {
    let state = AppState { default_timeout };

    let cors = CorsLayer::permissive();

    Router::new()
        .route("/health", get(health_check))
        .route("/execute", post(execute))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), ServerError> {
    info!("Starting go-exec server on {}", addr);
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| ServerError::ServerError(e.to_string()))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::ServerError(e.to_string()))?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}

async fn execute(
    State(state): State<AppState>,
    Json(payload): Json<ExecuteRequest>,
) -> Result<Json<CommandOutput>, ServerError> {
    let timeout = payload
        .timeout
        .map(Duration::from_secs)
        .unwrap_or(state.default_timeout);

    let executor = GoExecutor::new(Some(timeout));
    let result = executor
        .code_exec_go(&payload.code, &payload.packages.unwrap_or_default())
        .await?;

    Ok(Json(result))
}
