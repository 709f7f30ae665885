use axum::{
    extract::{Json, State},
    response::{IntoResponse, Response},
};
use serde_json::Value;
use tracing::{instrument, warn};

use cardio_risk_domain::services::flow::RETRY_LATER_MESSAGE;
use cardio_risk_domain::services::AssessmentServiceError;

use crate::api::handlers::assessment::SharedAssessmentService;
use crate::entities::common::ErrorResponse;

fn dashboard_response(name: &str, result: Result<Value, AssessmentServiceError>) -> Result<Json<Value>, Response> {
    // Upstream detail was logged by the service
    result.map(Json).map_err(|_| {
        warn!("{} unavailable, returning retry notice", name);
        ErrorResponse::upstream_unavailable(RETRY_LATER_MESSAGE).into_response()
    })
}

/// Model information dashboard, passed through from the prediction service
#[utoipa::path(
    get,
    path = "/api/v1/model-info",
    responses(
        (status = 200, description = "Model information", body = serde_json::Value),
        (status = 502, description = "Prediction service unavailable, retry later", body = ErrorResponse)
    ),
    tag = "dashboards"
)]
#[instrument(skip(service))]
pub async fn get_model_info(State(service): State<SharedAssessmentService>) -> impl IntoResponse {
    dashboard_response("Model info", service.model_info().await)
}

/// Dataset insight dashboard, passed through from the prediction service
#[utoipa::path(
    get,
    path = "/api/v1/data-insight",
    responses(
        (status = 200, description = "Dataset insight", body = serde_json::Value),
        (status = 502, description = "Prediction service unavailable, retry later", body = ErrorResponse)
    ),
    tag = "dashboards"
)]
#[instrument(skip(service))]
pub async fn get_data_insight(State(service): State<SharedAssessmentService>) -> impl IntoResponse {
    dashboard_response("Data insight", service.data_insight().await)
}
