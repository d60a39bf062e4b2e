use axum::{extract::State, Extension, Json};

use aruma_signals::ScoreReport;

use crate::api::{ApiResponse, AppState, ResponseMeta};
use crate::middleware::RequestId;

/// Re-read the on-disk documents, publish a fresh report, and return it.
/// Useful after an out-of-band collection run (the CLI writes documents but
/// does not talk to the server).
pub(super) async fn trigger_refresh(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<ScoreReport>> {
    let report = state.report.refresh(&state.store).await;
    tracing::info!(
        request_id = %req_id.0,
        overall = %report.scores.overall,
        "manual refresh complete"
    );
    Json(ApiResponse {
        data: (*report).clone(),
        meta: ResponseMeta::new(req_id.0),
    })
}
