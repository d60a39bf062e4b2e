use axum::{
    extract::{Path, State},
    Extension, Json,
};

use aruma_core::SourceKind;
use aruma_signals::SourceStatus;

use crate::api::{ApiError, ApiResponse, AppState, ResponseMeta};
use crate::middleware::RequestId;

/// Per-source status rows from the current report.
pub(super) async fn list_sources(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<SourceStatus>>> {
    let report = state.report.current().await;
    Json(ApiResponse {
        data: report.sources.clone(),
        meta: ResponseMeta::new(req_id.0),
    })
}

/// The latest raw document for one source, exactly as the producer wrote it.
pub(super) async fn get_source_document(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let source: SourceKind = slug
        .parse()
        .map_err(|e: String| ApiError::new(req_id.0.clone(), "bad_request", e))?;

    let store = state.store.clone();
    let document = tokio::task::spawn_blocking(move || store.read_latest_raw(source))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, source = %source, "snapshot read task failed");
            ApiError::new(
                req_id.0.clone(),
                "internal_error",
                "failed to read snapshot from disk",
            )
        })?;

    match document {
        Some(value) => Ok(Json(ApiResponse {
            data: value,
            meta: ResponseMeta::new(req_id.0),
        })),
        None => Err(ApiError::new(
            req_id.0,
            "not_found",
            format!("no document collected yet for source '{source}'"),
        )),
    }
}
