mod layers;
mod refresh;
mod scores;
mod sources;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir};

use aruma_collect::SnapshotStore;
use aruma_core::AppConfig;

use crate::middleware::{request_id, RequestId};
use crate::state::SharedReport;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: SnapshotStore,
    pub report: SharedReport,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
struct HealthData {
    status: &'static str,
    environment: String,
    sources_available: usize,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

pub fn build_app(state: AppState) -> Router {
    let data_dir = state.config.data_dir.clone();

    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/scores", get(scores::get_scores))
        .route("/api/v1/sources", get(sources::list_sources))
        .route(
            "/api/v1/sources/{source}",
            get(sources::get_source_document),
        )
        .route("/api/v1/refresh", post(refresh::trigger_refresh))
        .route("/api/v1/layers/decision", get(layers::get_decision_layer))
        .route("/api/v1/layers/execution", get(layers::get_execution_layer))
        .route(
            "/api/v1/layers/optimization",
            get(layers::get_optimization_layer),
        )
        .nest_service("/data", ServeDir::new(data_dir))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

/// Liveness plus a cheap data summary. The server serves the neutral report
/// when no documents are on disk, so this never reports degraded just
/// because a source has not been collected yet.
async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let report = state.report.current().await;
    let sources_available = report.sources.iter().filter(|s| s.available).count();

    (
        StatusCode::OK,
        Json(ApiResponse {
            data: HealthData {
                status: "ok",
                environment: state.config.env.to_string(),
                sources_available,
            },
            meta: ResponseMeta::new(req_id.0),
        }),
    )
}
