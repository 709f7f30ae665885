//! Domain layer health check functionality
//! This module provides health check services for the application

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::warn;

use cardio_risk_data::client::{HttpPredictionClient, PredictionGateway, UpstreamConfig, UpstreamError};

/// System health status
#[derive(Debug, Clone, PartialEq)]
pub enum SystemStatus {
    /// All components are healthy
    Healthy,
    /// Some components are degraded but the system is functional
    Degraded,
    /// System is not functioning properly
    Unhealthy,
}

/// Component health status
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentStatus {
    /// Component is functioning normally
    Healthy,
    /// Component is functioning but with reduced performance
    Degraded,
    /// Component is not functioning
    Unhealthy,
}

/// Represents a health component with status and optional details
#[derive(Debug, Clone)]
pub struct HealthComponent {
    /// Status of the component
    pub status: ComponentStatus,
    /// Optional details about the component status
    pub details: Option<String>,
}

/// Represents the overall health of the system
#[derive(Debug, Clone)]
pub struct SystemHealth {
    /// Overall system status
    pub status: SystemStatus,
    /// Map of component names to their health status
    pub components: HashMap<String, HealthComponent>,
}

/// Trait for health services
#[async_trait]
pub trait HealthServiceTrait: Send + Sync + std::fmt::Debug {
    /// Get the overall system health
    async fn get_system_health(&self) -> SystemHealth;

    /// Check the status of the prediction service
    /// Returns true if it answered, false if it answered with an error status
    /// Returns an error if it could not be reached at all
    async fn check_upstream_status(&self) -> Result<bool, String>;
}

/// Health service probing the prediction service through its gateway
#[derive(Debug)]
pub struct HealthService<G: PredictionGateway> {
    gateway: G,
}

impl<G: PredictionGateway> HealthService<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl<G: PredictionGateway + std::fmt::Debug> HealthServiceTrait for HealthService<G> {
    async fn get_system_health(&self) -> SystemHealth {
        build_system_health(self.check_upstream_status().await)
    }

    async fn check_upstream_status(&self) -> Result<bool, String> {
        match self.gateway.ping().await {
            Ok(()) => Ok(true),
            Err(e) if e.is_unreachable() => Err(format!("Prediction service unreachable: {}", e)),
            Err(UpstreamError::Status(code)) => {
                warn!("Prediction service answered health probe with status {}", code);
                Ok(false)
            }
            Err(e) => Err(e.to_string()),
        }
    }
}

/// Create a health service probing the configured prediction service
pub fn create_default_health_service(
    upstream: &UpstreamConfig,
) -> Result<HealthService<HttpPredictionClient>, UpstreamError> {
    Ok(HealthService::new(HttpPredictionClient::new(upstream)?))
}

/// Combine the upstream probe result into an overall health report
pub fn build_system_health(upstream_status: Result<bool, String>) -> SystemHealth {
    let upstream_component = match upstream_status {
        Ok(true) => HealthComponent {
            status: ComponentStatus::Healthy,
            details: None,
        },
        Ok(false) => HealthComponent {
            status: ComponentStatus::Degraded,
            details: Some("Prediction service is reachable but reports errors".to_string()),
        },
        Err(e) => HealthComponent {
            status: ComponentStatus::Unhealthy,
            details: Some(e),
        },
    };

    // Intake validation keeps working without the prediction service
    let overall_status = if upstream_component.status == ComponentStatus::Healthy {
        SystemStatus::Healthy
    } else {
        SystemStatus::Degraded
    };

    SystemHealth {
        status: overall_status,
        components: vec![
            (
                "api".to_string(),
                HealthComponent {
                    status: ComponentStatus::Healthy,
                    details: None,
                },
            ),
            ("prediction_service".to_string(), upstream_component),
        ]
        .into_iter()
        .collect(),
    }
}
