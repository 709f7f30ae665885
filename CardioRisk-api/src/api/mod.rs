pub mod handlers;
pub mod routes;
pub mod security;

use axum::Router;
use cardio_risk_data::client::UpstreamError;

/// Create the application router from the environment
pub fn create_application() -> Result<Router, UpstreamError> {
    routes::create_app()
}
