// HTTP request handlers

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use std::sync::Arc;

use super::RouterServer;
use crate::errors::RouteError;
use crate::router::RoutingMode;

/// Create the main application router
pub fn create_router(server: Arc<RouterServer>) -> Router {
    Router::new()
        .route("/v1/query", post(handle_query))
        .route("/v1/metrics", get(metrics_summary))
        .route("/v1/metrics/recent", get(metrics_recent))
        .route("/v1/metrics/comparison", get(metrics_comparison))
        .route("/health", get(health_check))
        .with_state(server)
}

/// Request body for POST /v1/query
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    /// The query text. Absent (not empty) means invalid input: an
    /// empty string scores 0 and routes normally.
    pub query: Option<String>,

    /// Routing mode; defaults to automatic.
    #[serde(default)]
    pub mode: RoutingMode,
}

/// Handle POST /v1/query - process one query through the pipeline
async fn handle_query(
    State(server): State<Arc<RouterServer>>,
    Json(request): Json<QueryRequest>,
) -> Result<Response, AppError> {
    let query = request
        .query
        .ok_or_else(|| RouteError::InvalidInput("request is missing the query field".to_string()))?;

    let record = server.orchestrator().process(&query, request.mode).await?;
    Ok(Json(record).into_response())
}

/// Handle GET /v1/metrics - lifetime summary projection
async fn metrics_summary(State(server): State<Arc<RouterServer>>) -> Response {
    Json(server.orchestrator().metrics().summary()).into_response()
}

#[derive(Debug, Deserialize)]
struct RecentParams {
    limit: Option<usize>,
}

/// Handle GET /v1/metrics/recent?limit=N
async fn metrics_recent(
    State(server): State<Arc<RouterServer>>,
    Query(params): Query<RecentParams>,
) -> Response {
    let limit = params.limit.unwrap_or(10);
    Json(server.orchestrator().metrics().recent(limit)).into_response()
}

/// Handle GET /v1/metrics/comparison - fast vs capable
async fn metrics_comparison(State(server): State<Arc<RouterServer>>) -> Response {
    Json(server.orchestrator().metrics().comparison()).into_response()
}

/// Handle GET /health
pub async fn health_check() -> Response {
    Json(serde_json::json!({ "status": "ok" })).into_response()
}

/// Error wrapper mapping the routing taxonomy onto HTTP statuses
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self.0, "Request failed");

        let status = match self.0.downcast_ref::<RouteError>() {
            Some(RouteError::InvalidInput(_)) => StatusCode::BAD_REQUEST,
            Some(RouteError::BackendTimeout { .. }) => StatusCode::GATEWAY_TIMEOUT,
            Some(RouteError::BackendUnavailable { .. }) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = serde_json::json!({
            "error": {
                "message": self.0.to_string(),
                "type": "routing_error"
            }
        });

        (status, Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
