// Testing utilities and mock implementations for the domain layer
// This module is only available when the "mock" feature is enabled

// Re-export the gateway mock from the data layer
pub use cardio_risk_data::client::MockPredictionGateway;

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};

use crate::entities::assessment::{RiskAssessment, RiskReport};
use crate::entities::intake::{IntakeRecord, RawIntake};
use crate::health::{ComponentStatus, HealthComponent, HealthServiceTrait, SystemHealth, SystemStatus};
use crate::services::assessment::{AssessmentServiceError, AssessmentServiceTrait};
use crate::services::intake;
use crate::services::risk::RiskClassifier;

/// A complete, valid intake submission
pub fn valid_raw_intake() -> RawIntake {
    let mut raw = RawIntake::new();
    raw.insert("age".to_string(), json!(45));
    raw.insert("height".to_string(), json!(170));
    raw.insert("weight".to_string(), json!(75));
    raw.insert("gender".to_string(), json!("male"));
    raw.insert("systolic".to_string(), json!(120));
    raw.insert("diastolic".to_string(), json!(80));
    raw.insert("cholesterol".to_string(), json!("normal"));
    raw.insert("glucose".to_string(), json!("normal"));
    raw.insert("smokes".to_string(), json!(false));
    raw.insert("drinks_alcohol".to_string(), json!(false));
    raw.insert("physically_active".to_string(), json!(true));
    raw
}

/// Mock implementation of the AssessmentServiceTrait for testing
///
/// Validation is real; the prediction is a fixed probability.
#[derive(Debug)]
pub struct MockAssessmentService {
    classifier: RiskClassifier,
    probability: f64,
    should_fail_upstream: bool,
    dashboards: HashMap<&'static str, Value>,
    assess_calls: AtomicUsize,
}

impl Default for MockAssessmentService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAssessmentService {
    /// Create a mock answering every prediction with 25%
    pub fn new() -> Self {
        Self {
            classifier: RiskClassifier::default(),
            probability: 25.0,
            should_fail_upstream: false,
            dashboards: HashMap::new(),
            assess_calls: AtomicUsize::new(0),
        }
    }

    /// Answer predictions with this probability in percent
    pub fn with_probability(mut self, probability: f64) -> Self {
        self.probability = probability;
        self
    }

    /// Configure the mock to fail every upstream call
    pub fn with_upstream_failure(mut self) -> Self {
        self.should_fail_upstream = true;
        self
    }

    /// Serve this model-info payload
    pub fn with_model_info(mut self, value: Value) -> Self {
        self.dashboards.insert("model-info", value);
        self
    }

    /// Serve this data-insight payload
    pub fn with_data_insight(mut self, value: Value) -> Self {
        self.dashboards.insert("data-insight", value);
        self
    }

    /// Number of `assess` calls that got past validation
    pub fn assess_calls(&self) -> usize {
        self.assess_calls.load(Ordering::SeqCst)
    }

    fn upstream_failure() -> AssessmentServiceError {
        AssessmentServiceError::Upstream(
            "Upstream error - mock is configured to fail (http://10.0.0.1:8000/predict)".to_string(),
        )
    }

    fn dashboard(&self, name: &str) -> Result<Value, AssessmentServiceError> {
        if self.should_fail_upstream {
            return Err(Self::upstream_failure());
        }
        Ok(self.dashboards.get(name).cloned().unwrap_or_else(|| json!({})))
    }
}

#[async_trait]
impl AssessmentServiceTrait for MockAssessmentService {
    fn validate_intake(&self, raw: &RawIntake) -> Result<IntakeRecord, AssessmentServiceError> {
        intake::validate_intake(raw).map_err(AssessmentServiceError::Validation)
    }

    fn classify(&self, probability_percent: f64) -> RiskAssessment {
        self.classifier.classify(probability_percent)
    }

    async fn assess(&self, raw: &RawIntake) -> Result<RiskReport, AssessmentServiceError> {
        self.validate_intake(raw)?;
        self.assess_calls.fetch_add(1, Ordering::SeqCst);

        if self.should_fail_upstream {
            return Err(Self::upstream_failure());
        }

        let assessment = self.classify(self.probability);
        Ok(RiskReport {
            submission_id: uuid::Uuid::new_v4(),
            generated_at: Utc::now(),
            is_cardio: self.probability >= 50.0,
            upstream_status: "success".to_string(),
            assessment,
        })
    }

    async fn model_info(&self) -> Result<Value, AssessmentServiceError> {
        self.dashboard("model-info")
    }

    async fn data_insight(&self) -> Result<Value, AssessmentServiceError> {
        self.dashboard("data-insight")
    }
}

/// Mock implementation of health services for testing system health
#[derive(Debug)]
pub struct MockHealthService {
    /// Prediction service component status
    upstream_status: ComponentStatus,
    /// System status
    system_status: SystemStatus,
    /// Additional components
    components: HashMap<String, HealthComponent>,
}

impl Default for MockHealthService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHealthService {
    /// Create a new mock health service with all components healthy
    pub fn new() -> Self {
        Self {
            upstream_status: ComponentStatus::Healthy,
            system_status: SystemStatus::Healthy,
            components: HashMap::new(),
        }
    }

    /// Configure the mock with a degraded prediction service
    pub fn with_degraded_upstream(mut self) -> Self {
        self.upstream_status = ComponentStatus::Degraded;
        self.system_status = SystemStatus::Degraded;
        self
    }

    /// Configure the mock with an unreachable prediction service
    pub fn with_unhealthy_upstream(mut self) -> Self {
        self.upstream_status = ComponentStatus::Unhealthy;
        self.system_status = SystemStatus::Degraded;
        self
    }

    /// Set the overall system status
    pub fn with_system_status(mut self, status: SystemStatus) -> Self {
        self.system_status = status;
        self
    }

    /// Add a custom component with a specific status
    pub fn with_component(mut self, name: &str, status: ComponentStatus, details: Option<String>) -> Self {
        self.components
            .insert(name.to_string(), HealthComponent { status, details });
        self
    }
}

#[async_trait]
impl HealthServiceTrait for MockHealthService {
    async fn get_system_health(&self) -> SystemHealth {
        let mut components = HashMap::new();

        components.insert(
            "prediction_service".to_string(),
            HealthComponent {
                status: self.upstream_status.clone(),
                details: match self.upstream_status {
                    ComponentStatus::Healthy => None,
                    ComponentStatus::Degraded => Some("Prediction service is returning errors".to_string()),
                    ComponentStatus::Unhealthy => Some("Prediction service unreachable".to_string()),
                },
            },
        );

        components.insert(
            "api".to_string(),
            HealthComponent {
                status: ComponentStatus::Healthy,
                details: None,
            },
        );

        for (name, component) in &self.components {
            components.insert(name.clone(), component.clone());
        }

        SystemHealth {
            status: self.system_status.clone(),
            components,
        }
    }

    async fn check_upstream_status(&self) -> Result<bool, String> {
        match self.upstream_status {
            ComponentStatus::Healthy => Ok(true),
            ComponentStatus::Degraded => Ok(false),
            ComponentStatus::Unhealthy => Err("Prediction service unreachable".to_string()),
        }
    }
}

/// Factory function to create a mock assessment service
pub fn create_mock_assessment_service() -> impl AssessmentServiceTrait {
    MockAssessmentService::new()
}

/// Factory function to create a mock health service
pub fn create_mock_health_service() -> impl HealthServiceTrait {
    MockHealthService::new()
}
