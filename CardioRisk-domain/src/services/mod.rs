pub mod assessment;
pub mod flow;
pub mod intake;
pub mod risk;

// Domain services
// This module contains business logic implementations.

// Re-export service traits and factory functions
pub use assessment::{
    create_default_assessment_service, AssessmentService, AssessmentServiceError, AssessmentServiceTrait,
};
pub use flow::{AssessmentFlow, FailureNotice, FlowState};
pub use intake::{intake_form, validate_intake};
pub use risk::{classify, ClassifierConfig, RiskClassifier, HIGH_RISK_THRESHOLD, MEDIUM_RISK_THRESHOLD};
