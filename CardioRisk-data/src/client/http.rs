use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::config::UpstreamConfig;
use super::errors::UpstreamError;
use super::gateway::PredictionGateway;
use crate::models::prediction::{PredictRequest, PredictResponse};

/// Header carrying the static service key
pub const API_KEY_HEADER: &str = "x-api-key";

/// reqwest-backed client for the prediction service
#[derive(Debug, Clone)]
pub struct HttpPredictionClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpPredictionClient {
    /// Create a client from the upstream configuration
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| UpstreamError::Config(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let mut builder = self.client.request(method, url).header(ACCEPT, "application/json");

        if let Some(key) = &self.api_key {
            builder = builder.header(API_KEY_HEADER, key);
        }

        builder
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        endpoint: &str,
    ) -> Result<T, UpstreamError> {
        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!("Prediction service {} answered with status {}", endpoint, status);
            return Err(UpstreamError::Status(status.as_u16()));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| UpstreamError::MalformedResponse(format!("{}: {}", endpoint, e)))
    }
}

#[async_trait]
impl PredictionGateway for HttpPredictionClient {
    async fn predict(&self, request: &PredictRequest) -> Result<PredictResponse, UpstreamError> {
        debug!("Sending prediction request to {}", self.base_url);
        let builder = self.request(Method::POST, "predict").json(request);
        self.send_json(builder, "/predict").await
    }

    async fn model_info(&self) -> Result<Value, UpstreamError> {
        debug!("Fetching model info from {}", self.base_url);
        self.send_json(self.request(Method::GET, "model-info"), "/model-info").await
    }

    async fn data_insight(&self) -> Result<Value, UpstreamError> {
        debug!("Fetching data insight from {}", self.base_url);
        self.send_json(self.request(Method::GET, "data-insight"), "/data-insight").await
    }

    async fn ping(&self) -> Result<(), UpstreamError> {
        let response = self.request(Method::GET, "").send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(())
        } else {
            Err(UpstreamError::Status(status.as_u16()))
        }
    }
}
