use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, info};
use uuid::Uuid;

use cardio_risk_data::cache::{DashboardCache, DashboardKind};
use cardio_risk_data::client::{HttpPredictionClient, PredictionGateway, UpstreamConfig, UpstreamError};

use crate::entities::assessment::{RiskAssessment, RiskReport};
use crate::entities::conversions;
use crate::entities::intake::{FieldError, IntakeRecord, RawIntake};
use crate::services::intake;
use crate::services::risk::{ClassifierConfig, RiskClassifier};

/// Assessment service errors
#[derive(Debug, Error)]
pub enum AssessmentServiceError {
    /// One or more intake fields failed validation
    #[error("Validation failed: {}", summarize(.0))]
    Validation(Vec<FieldError>),

    /// Prediction service failed or answered with something unusable
    #[error("Prediction service error: {0}")]
    Upstream(String),
}

fn summarize(errors: &[FieldError]) -> String {
    errors.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; ")
}

impl From<UpstreamError> for AssessmentServiceError {
    fn from(err: UpstreamError) -> Self {
        AssessmentServiceError::Upstream(err.to_string())
    }
}

/// Trait for assessment operations
#[async_trait]
pub trait AssessmentServiceTrait: Send + Sync {
    /// Validate a raw submission without contacting the prediction service
    fn validate_intake(&self, raw: &RawIntake) -> Result<IntakeRecord, AssessmentServiceError>;

    /// Present a probability in percent
    fn classify(&self, probability_percent: f64) -> RiskAssessment;

    /// Validate, predict and classify one submission
    async fn assess(&self, raw: &RawIntake) -> Result<RiskReport, AssessmentServiceError>;

    /// Model information dashboard payload
    async fn model_info(&self) -> Result<Value, AssessmentServiceError>;

    /// Dataset insight dashboard payload
    async fn data_insight(&self) -> Result<Value, AssessmentServiceError>;
}

/// Assessment service backed by a prediction gateway
pub struct AssessmentService<G: PredictionGateway> {
    gateway: G,
    classifier: RiskClassifier,
    cache: DashboardCache,
}

impl<G: PredictionGateway> AssessmentService<G> {
    /// Create a new assessment service
    pub fn new(gateway: G, classifier: RiskClassifier, cache: DashboardCache) -> Self {
        Self {
            gateway,
            classifier,
            cache,
        }
    }

    /// Serve a dashboard from cache or fetch and remember it
    async fn dashboard(&self, kind: DashboardKind) -> Result<Value, AssessmentServiceError> {
        if let Some(value) = self.cache.get(kind) {
            return Ok(value);
        }

        debug!("Fetching {} from prediction service", kind.name());
        let result = match kind {
            DashboardKind::ModelInfo => self.gateway.model_info().await,
            DashboardKind::DataInsight => self.gateway.data_insight().await,
        };

        match result {
            Ok(value) => {
                self.cache.insert(kind, value.clone());
                Ok(value)
            }
            Err(e) => {
                error!("Failed to fetch {}: {}", kind.name(), e);
                Err(e.into())
            }
        }
    }
}

#[async_trait]
impl<G: PredictionGateway> AssessmentServiceTrait for AssessmentService<G> {
    fn validate_intake(&self, raw: &RawIntake) -> Result<IntakeRecord, AssessmentServiceError> {
        intake::validate_intake(raw).map_err(AssessmentServiceError::Validation)
    }

    fn classify(&self, probability_percent: f64) -> RiskAssessment {
        self.classifier.classify(probability_percent)
    }

    async fn assess(&self, raw: &RawIntake) -> Result<RiskReport, AssessmentServiceError> {
        let record = self.validate_intake(raw)?;
        let request = conversions::convert_to_data_predict_request(&record);

        let response = self.gateway.predict(&request).await.map_err(|e| {
            error!("Prediction request failed: {}", e);
            AssessmentServiceError::from(e)
        })?;

        let probability = response.probability_percent().map_err(|e| {
            error!("Unusable prediction response: {}", e);
            AssessmentServiceError::from(e)
        })?;

        let assessment = self.classifier.classify(probability);
        let report = RiskReport {
            submission_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            is_cardio: response.is_cardio(),
            upstream_status: response.status.clone(),
            assessment,
        };

        info!(
            "Assessment {} classified as {} ({}%)",
            report.submission_id, report.assessment.tier, report.assessment.display_percent
        );
        Ok(report)
    }

    async fn model_info(&self) -> Result<Value, AssessmentServiceError> {
        self.dashboard(DashboardKind::ModelInfo).await
    }

    async fn data_insight(&self) -> Result<Value, AssessmentServiceError> {
        self.dashboard(DashboardKind::DataInsight).await
    }
}

/// Create an assessment service talking to the configured prediction service
pub fn create_default_assessment_service(
    upstream: &UpstreamConfig,
    classifier: ClassifierConfig,
) -> Result<AssessmentService<HttpPredictionClient>, UpstreamError> {
    let client = HttpPredictionClient::new(upstream)?;
    Ok(AssessmentService::new(
        client,
        RiskClassifier::new(classifier),
        DashboardCache::new(upstream.cache_ttl),
    ))
}
