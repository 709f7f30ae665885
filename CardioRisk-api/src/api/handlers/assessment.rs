use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{json, Value};
use tracing::{error, info, instrument, warn};

use cardio_risk_domain::entities::{FieldError, RawIntake};
use cardio_risk_domain::services::{
    intake_form, AssessmentFlow, AssessmentServiceError, AssessmentServiceTrait, FlowState,
};

use crate::entities::assessment::{IntakeFormResponse, ResetResponse, ValidationResponse};
use crate::entities::common::ErrorResponse;

/// Service type for dependency injection
pub type SharedAssessmentService = Arc<dyn AssessmentServiceTrait + Send + Sync>;

const FIELD_ERRORS_MESSAGE: &str = "Please correct the highlighted fields";

/// Turn a JSON body into a raw intake map
fn raw_intake(body: Result<Json<Value>, JsonRejection>) -> Result<RawIntake, Response> {
    match body {
        Ok(Json(Value::Object(map))) => Ok(map),
        Ok(Json(_)) => Err(ErrorResponse::bad_request("Request body must be a JSON object").into_response()),
        Err(rejection) => {
            warn!("Rejected intake body: {}", rejection.body_text());
            Err(ErrorResponse::bad_request("Request body must be valid JSON").into_response())
        }
    }
}

fn field_errors_response(errors: &[FieldError]) -> Response {
    ErrorResponse::validation_error(FIELD_ERRORS_MESSAGE, Some(json!(errors))).into_response()
}

/// Describe the intake form
#[utoipa::path(
    get,
    path = "/api/v1/intake/form",
    responses(
        (status = 200, description = "Intake form fields in display order", body = IntakeFormResponse)
    ),
    tag = "intake"
)]
#[instrument]
pub async fn get_intake_form() -> impl IntoResponse {
    Json(IntakeFormResponse { fields: intake_form() })
}

/// Validate a submission without requesting a prediction
#[utoipa::path(
    post,
    path = "/api/v1/intake/validate",
    request_body = crate::entities::assessment::IntakeSubmission,
    responses(
        (status = 200, description = "Submission is valid", body = ValidationResponse),
        (status = 400, description = "Field errors", body = ErrorResponse)
    ),
    tag = "intake"
)]
#[instrument(skip(service, body))]
pub async fn validate_intake(
    State(service): State<SharedAssessmentService>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, Response> {
    let raw = raw_intake(body)?;

    match service.validate_intake(&raw) {
        Ok(record) => Ok((StatusCode::OK, Json(ValidationResponse { valid: true, record }))),
        Err(AssessmentServiceError::Validation(errors)) => {
            info!("Intake has {} field error(s)", errors.len());
            Err(field_errors_response(&errors))
        }
        Err(e) => {
            error!("Unexpected error validating intake: {}", e);
            Err(ErrorResponse::internal_error().into_response())
        }
    }
}

/// Submit the intake form and get a risk assessment
#[utoipa::path(
    post,
    path = "/api/v1/assessments",
    request_body = crate::entities::assessment::IntakeSubmission,
    responses(
        (status = 200, description = "Risk assessment", body = cardio_risk_domain::entities::RiskReport),
        (status = 400, description = "Field errors", body = ErrorResponse),
        (status = 502, description = "Prediction service unavailable, retry later", body = ErrorResponse)
    ),
    tag = "assessments"
)]
#[instrument(skip(service, body))]
pub async fn create_assessment(
    State(service): State<SharedAssessmentService>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, Response> {
    let raw = raw_intake(body)?;

    let mut flow = AssessmentFlow::new();
    flow.submit(service.as_ref(), &raw).await;

    match flow.into_state() {
        FlowState::Showing(report) => {
            info!("Assessment {} ready", report.submission_id);
            Ok((StatusCode::OK, Json(report)))
        }
        FlowState::Invalid(errors) => {
            info!("Assessment rejected with {} field error(s)", errors.len());
            Err(field_errors_response(&errors))
        }
        FlowState::Failed(notice) => {
            warn!("Assessment failed upstream, returning retry notice");
            Err(ErrorResponse::upstream_unavailable(&notice.message).into_response())
        }
        FlowState::Intake => {
            error!("Assessment flow did not leave the intake state");
            Err(ErrorResponse::internal_error().into_response())
        }
    }
}

/// Discard the current result and return to the form
#[utoipa::path(
    post,
    path = "/api/v1/assessments/reset",
    responses(
        (status = 200, description = "Back at the intake form", body = ResetResponse)
    ),
    tag = "assessments"
)]
#[instrument]
pub async fn reset_assessment() -> impl IntoResponse {
    let mut flow = AssessmentFlow::new();
    let state = flow.reset().name().to_string();

    Json(ResetResponse {
        state,
        form: intake_form(),
    })
}
