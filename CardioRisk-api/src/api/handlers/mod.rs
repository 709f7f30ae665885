pub mod assessment;
pub mod dashboard;
pub mod health;

// Tests module
#[cfg(test)]
mod tests;

// Re-export handlers for easier imports
pub use assessment::{create_assessment, get_intake_form, reset_assessment, validate_intake, SharedAssessmentService};
pub use dashboard::{get_data_insight, get_model_info};
pub use health::{health_check, SharedHealthService};
