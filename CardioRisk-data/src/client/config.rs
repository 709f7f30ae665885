use std::env;
use std::time::Duration;

use tracing::{debug, info, warn};

/// Default location of the prediction service during local development
const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Prediction service configuration from environment variables
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Base URL of the prediction service, without trailing slash
    pub base_url: String,
    /// Static key sent in the `x-api-key` header, if any
    pub api_key: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
    /// How long dashboard payloads are served from cache
    pub cache_ttl: Duration,
}

impl UpstreamConfig {
    /// Create a configuration for the given base URL with default timings
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: None,
            timeout: Duration::from_secs(10),
            cache_ttl: Duration::from_secs(24 * 3600),
        }
    }

    /// Set the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the dashboard cache lifetime
    pub fn with_cache_ttl(mut self, cache_ttl: Duration) -> Self {
        self.cache_ttl = cache_ttl;
        self
    }

    /// Build the configuration from environment variables
    ///
    /// Reads `CARDIO_API_URL`, `CARDIO_API_KEY`, `CARDIO_API_TIMEOUT_SECONDS`
    /// and `DASHBOARD_CACHE_HOURS`. Problems are logged as warnings.
    pub fn from_env() -> Self {
        let base_url = env::var("CARDIO_API_URL").unwrap_or_else(|_| {
            debug!("CARDIO_API_URL not set - using {}", DEFAULT_API_URL);
            DEFAULT_API_URL.to_string()
        });

        let api_key = env::var("CARDIO_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
        if api_key.is_none() {
            warn!("CARDIO_API_KEY not set - requests to the prediction service will be unauthenticated");
        }

        let timeout_seconds = env::var("CARDIO_API_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(10);

        let cache_hours = env::var("DASHBOARD_CACHE_HOURS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(24);

        let mut config = Self::new(base_url)
            .with_timeout(Duration::from_secs(timeout_seconds))
            .with_cache_ttl(Duration::from_secs(cache_hours * 3600));
        config.api_key = api_key;

        info!(
            "Prediction service configuration: url={}, timeout={}s, cache={}h",
            config.base_url, timeout_seconds, cache_hours
        );

        if let Err(errors) = config.validate() {
            for error in &errors {
                warn!("Prediction service configuration warning: {}", error);
            }
        }

        config
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        match url::Url::parse(&self.base_url) {
            Ok(parsed) if parsed.scheme() != "http" && parsed.scheme() != "https" => {
                errors.push(format!("CARDIO_API_URL has unsupported scheme: {}", parsed.scheme()));
            }
            Ok(_) => {}
            Err(e) => errors.push(format!("CARDIO_API_URL is not a valid URL: {}", e)),
        }

        if self.timeout.is_zero() {
            errors.push("CARDIO_API_TIMEOUT_SECONDS must be greater than zero".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_strips_trailing_slash() {
        let config = UpstreamConfig::new("https://cardio.example.org/");
        assert_eq!(config.base_url, "https://cardio.example.org");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(UpstreamConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_reports_every_problem() {
        let config = UpstreamConfig::new("not a url").with_timeout(Duration::ZERO);
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("CARDIO_API_URL"));
        assert!(errors[1].contains("TIMEOUT"));
    }

    #[test]
    fn test_validate_rejects_non_http_scheme() {
        let config = UpstreamConfig::new("ftp://cardio.example.org");
        let errors = config.validate().unwrap_err();
        assert!(errors[0].contains("scheme"));
    }
}
