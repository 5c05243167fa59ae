use crate::budget::SolverConfig;
use crate::config::ServerConfig;
use crate::data::{ConstraintSet, TimetableOutput};
use crate::error::SolveError;
use crate::solver;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use log::{error, info};
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    success: bool,
    #[serde(flatten)]
    output: TimetableOutput,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    success: bool,
    kind: &'static str,
    error: String,
}

#[derive(Debug)]
enum ApiError {
    /// The body is not a well-formed constraint document.
    Malformed(String),
    Solve(SolveError),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind, error) = match self {
            ApiError::Malformed(msg) => (StatusCode::BAD_REQUEST, "invalid_input", msg),
            ApiError::Solve(e) => {
                let status = match e {
                    SolveError::Invalid(_) => StatusCode::BAD_REQUEST,
                    SolveError::Infeasible => StatusCode::UNPROCESSABLE_ENTITY,
                    SolveError::Aborted(_) => StatusCode::SERVICE_UNAVAILABLE,
                };
                (status, e.kind(), e.to_string())
            }
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal", msg),
        };
        let body = ErrorResponse {
            success: false,
            kind,
            error,
        };
        (status, Json(body)).into_response()
    }
}

/// Raises the flag when the request future is dropped, e.g. on client
/// disconnect, so the blocking search stops early.
struct CancelOnDrop(Arc<AtomicBool>);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

async fn generate_handler(
    State(config): State<SolverConfig>,
    payload: Result<Json<ConstraintSet>, JsonRejection>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let Json(input) = payload.map_err(|rejection| {
        ApiError::Malformed(format!("Invalid constraints: {}", rejection.body_text()))
    })?;

    let stop = Arc::new(AtomicBool::new(false));
    let _guard = CancelOnDrop(Arc::clone(&stop));

    let result = tokio::task::spawn_blocking(move || {
        solver::solve_with_interrupt(&input, &config, &stop)
    })
    .await;

    match result {
        Ok(Ok(output)) => Ok(Json(GenerateResponse {
            success: true,
            output,
        })),
        Ok(Err(e)) => Err(ApiError::Solve(e)),
        Err(join_error) => {
            error!("Solver task failed: {join_error}");
            Err(ApiError::Internal(join_error.to_string()))
        }
    }
}

async fn health_handler() -> &'static str {
    "ok"
}

pub fn router(config: SolverConfig) -> Router {
    Router::new()
        .route("/v1/timetable/generate", post(generate_handler))
        .route("/health", get(health_handler))
        .with_state(config)
}

pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let app = router(config.solver);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;

    info!("Server running at http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
