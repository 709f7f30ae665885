use async_trait::async_trait;
use serde_json::Value;

use super::errors::UpstreamError;
use crate::models::prediction::{PredictRequest, PredictResponse};

/// Operations offered by the remote prediction service
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait PredictionGateway: Send + Sync {
    /// Submit a validated record and receive the classifier output
    async fn predict(&self, request: &PredictRequest) -> Result<PredictResponse, UpstreamError>;

    /// Model metadata, hyperparameters, metrics and feature importances
    async fn model_info(&self) -> Result<Value, UpstreamError>;

    /// Dataset shape, cross-validated accuracies and feature correlations
    async fn data_insight(&self) -> Result<Value, UpstreamError>;

    /// Check that the service is answering
    async fn ping(&self) -> Result<(), UpstreamError>;
}
