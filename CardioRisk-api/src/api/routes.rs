use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use tower_http::trace::TraceLayer;
use tracing::debug;

use cardio_risk_data::client::{UpstreamConfig, UpstreamError};
use cardio_risk_domain::health::create_default_health_service;
use cardio_risk_domain::services::{create_default_assessment_service, ClassifierConfig};

use crate::api::handlers::{assessment, dashboard, health, SharedAssessmentService, SharedHealthService};
use crate::api::security::{allowed_origins_from_env, configure_security};
use crate::openapi::configure_swagger_routes;

/// Create the application router from environment configuration
pub fn create_app() -> Result<Router, UpstreamError> {
    debug!("Creating application router");

    let upstream = UpstreamConfig::from_env();
    let assessment_service: SharedAssessmentService =
        Arc::new(create_default_assessment_service(&upstream, ClassifierConfig::from_env())?);
    let health_service: SharedHealthService = Arc::new(create_default_health_service(&upstream)?);

    Ok(create_app_with(
        assessment_service,
        health_service,
        &allowed_origins_from_env(),
    ))
}

/// Create the application router around the given services
pub fn create_app_with(
    assessment_service: SharedAssessmentService,
    health_service: SharedHealthService,
    allowed_origins: &[String],
) -> Router {
    let api_routes = Router::new()
        .route("/intake/form", get(assessment::get_intake_form))
        .route("/intake/validate", post(assessment::validate_intake))
        .route("/assessments", post(assessment::create_assessment))
        .route("/assessments/reset", post(assessment::reset_assessment))
        .route("/model-info", get(dashboard::get_model_info))
        .route("/data-insight", get(dashboard::get_data_insight))
        .with_state(assessment_service);

    debug!("API routes configured");

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .layer(Extension(health_service));

    let app = Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .merge(configure_swagger_routes())
        .layer(TraceLayer::new_for_http());

    debug!("Swagger UI merged");

    let app = configure_security(app, allowed_origins);
    debug!("Security configuration applied");

    // Initialize health check service startup time
    health::initialize_server_start_time();

    app
}
