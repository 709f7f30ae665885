use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Configure Swagger UI endpoints
pub fn configure_swagger_routes() -> SwaggerUi {
    SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}

// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        crate::api::handlers::health::health_check,

        // Intake endpoints
        crate::api::handlers::assessment::get_intake_form,
        crate::api::handlers::assessment::validate_intake,

        // Assessment endpoints
        crate::api::handlers::assessment::create_assessment,
        crate::api::handlers::assessment::reset_assessment,

        // Dashboard endpoints
        crate::api::handlers::dashboard::get_model_info,
        crate::api::handlers::dashboard::get_data_insight
    ),
    components(
        schemas(
            // Entities
            crate::entities::assessment::IntakeSubmission,
            crate::entities::assessment::IntakeFormResponse,
            crate::entities::assessment::ValidationResponse,
            crate::entities::assessment::ResetResponse,
            crate::entities::common::ErrorResponse,

            // Health handlers
            crate::api::handlers::health::HealthResponse,
            crate::api::handlers::health::ComponentStatus,
            crate::api::handlers::health::ComponentHealthStatus,

            // Domain schemas
            cardio_risk_domain::entities::IntakeField,
            cardio_risk_domain::entities::IntakeRecord,
            cardio_risk_domain::entities::Gender,
            cardio_risk_domain::entities::Level,
            cardio_risk_domain::entities::FieldError,
            cardio_risk_domain::entities::FieldErrorKind,
            cardio_risk_domain::entities::FieldSpec,
            cardio_risk_domain::entities::InputKind,
            cardio_risk_domain::entities::ChoiceOption,
            cardio_risk_domain::entities::RiskReport,
            cardio_risk_domain::entities::RiskAssessment,
            cardio_risk_domain::entities::RiskTier,
            cardio_risk_domain::entities::Recommendation,
            cardio_risk_domain::entities::RecommendationCategory,
            cardio_risk_domain::entities::ChartSlice,
            cardio_risk_domain::entities::ModelBadge
        )
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "intake", description = "Intake form description and validation"),
        (name = "assessments", description = "Cardiovascular risk assessments"),
        (name = "dashboards", description = "Model and dataset information from the prediction service")
    ),
    info(
        title = "CardioRisk API",
        version = "0.1.0",
        description = "Validates patient measurements, requests a cardiovascular disease probability and presents it as a risk tier. Research use only.",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        ),
    ),
    servers(
        (url = "/", description = "Local development server")
    )
)]
pub struct ApiDoc;
