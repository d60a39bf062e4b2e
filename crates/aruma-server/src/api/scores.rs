use axum::{extract::State, Extension, Json};

use aruma_signals::ScoreReport;

use crate::api::{ApiResponse, AppState, ResponseMeta};
use crate::middleware::RequestId;

/// Serve the current aggregated report: scores, insights, source statuses.
pub(super) async fn get_scores(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<ScoreReport>> {
    let report = state.report.current().await;
    Json(ApiResponse {
        data: (*report).clone(),
        meta: ResponseMeta::new(req_id.0),
    })
}
