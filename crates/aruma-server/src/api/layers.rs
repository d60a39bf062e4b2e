//! Strategy-layer endpoints.
//!
//! The three layers are curated content maintained in
//! [`aruma_signals::strategy`], so these handlers only wrap them in the
//! response envelope.

use axum::{Extension, Json};

use aruma_signals::strategy::{
    self, DecisionLayerData, ExecutionLayerData, OptimizationLayerData,
};

use crate::api::{ApiResponse, ResponseMeta};
use crate::middleware::RequestId;

pub(super) async fn get_decision_layer(
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<DecisionLayerData>> {
    Json(ApiResponse {
        data: strategy::decision_layer(),
        meta: ResponseMeta::new(req_id.0),
    })
}

pub(super) async fn get_execution_layer(
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<ExecutionLayerData>> {
    Json(ApiResponse {
        data: strategy::execution_layer(),
        meta: ResponseMeta::new(req_id.0),
    })
}

pub(super) async fn get_optimization_layer(
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<OptimizationLayerData>> {
    Json(ApiResponse {
        data: strategy::optimization_layer(),
        meta: ResponseMeta::new(req_id.0),
    })
}
