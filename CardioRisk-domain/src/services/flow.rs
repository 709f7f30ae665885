use tracing::debug;

use crate::entities::assessment::RiskReport;
use crate::entities::intake::{FieldError, RawIntake};
use crate::services::assessment::{AssessmentServiceError, AssessmentServiceTrait};

/// Message shown when the prediction service cannot be used
pub const RETRY_LATER_MESSAGE: &str = "Failed to get prediction. Please try again later.";

/// User-facing notice for a failed prediction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureNotice {
    pub message: String,
}

impl Default for FailureNotice {
    fn default() -> Self {
        Self {
            message: RETRY_LATER_MESSAGE.to_string(),
        }
    }
}

/// Where a submission currently stands
#[derive(Debug, Clone, PartialEq)]
pub enum FlowState {
    /// Waiting for the form
    Intake,
    /// Last submission failed validation
    Invalid(Vec<FieldError>),
    /// Showing a result
    Showing(RiskReport),
    /// Prediction failed; the user may resubmit
    Failed(FailureNotice),
}

impl FlowState {
    pub fn name(&self) -> &'static str {
        match self {
            FlowState::Intake => "intake",
            FlowState::Invalid(_) => "invalid",
            FlowState::Showing(_) => "showing",
            FlowState::Failed(_) => "failed",
        }
    }
}

/// Intake to result state machine for one user
#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentFlow {
    state: FlowState,
}

impl Default for AssessmentFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl AssessmentFlow {
    pub fn new() -> Self {
        Self {
            state: FlowState::Intake,
        }
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn into_state(self) -> FlowState {
        self.state
    }

    /// Run a submission through the service and move to the resulting state
    ///
    /// Upstream detail stays in the logs; the state only carries the generic notice.
    pub async fn submit<S>(&mut self, service: &S, raw: &RawIntake) -> &FlowState
    where
        S: AssessmentServiceTrait + ?Sized,
    {
        self.state = match service.assess(raw).await {
            Ok(report) => FlowState::Showing(report),
            Err(AssessmentServiceError::Validation(errors)) => FlowState::Invalid(errors),
            Err(AssessmentServiceError::Upstream(_)) => FlowState::Failed(FailureNotice::default()),
        };
        debug!("Assessment flow moved to {}", self.state.name());
        &self.state
    }

    /// Discard any result or errors and return to the form
    pub fn reset(&mut self) -> &FlowState {
        self.state = FlowState::Intake;
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{valid_raw_intake, MockAssessmentService};

    #[tokio::test]
    async fn test_successful_submission_shows_report() {
        let service = MockAssessmentService::new().with_probability(55.0);
        let mut flow = AssessmentFlow::new();

        match flow.submit(&service, &valid_raw_intake()).await {
            FlowState::Showing(report) => assert_eq!(report.assessment.display_percent, 55),
            other => panic!("expected a report, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_submission_keeps_errors() {
        let service = MockAssessmentService::new();
        let mut flow = AssessmentFlow::new();
        let mut raw = valid_raw_intake();
        raw.remove("height");

        let state = flow.submit(&service, &raw).await;
        assert!(matches!(state, FlowState::Invalid(errors) if errors.len() == 1));
    }

    #[tokio::test]
    async fn test_upstream_failure_shows_generic_notice() {
        let service = MockAssessmentService::new().with_upstream_failure();
        let mut flow = AssessmentFlow::new();

        let state = flow.submit(&service, &valid_raw_intake()).await;
        assert_eq!(state, &FlowState::Failed(FailureNotice::default()));
    }

    #[tokio::test]
    async fn test_reset_is_idempotent() {
        let service = MockAssessmentService::new().with_probability(80.0);
        let mut flow = AssessmentFlow::new();
        flow.submit(&service, &valid_raw_intake()).await;

        assert_eq!(flow.reset(), &FlowState::Intake);
        let once = flow.clone();
        flow.reset();
        assert_eq!(flow, once);
        assert_eq!(service.assess_calls(), 1);
    }
}
