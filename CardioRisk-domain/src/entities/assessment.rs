use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

/// Color of the unfilled part of a proportion chart
pub const TRACK_COLOR: &str = "#e7e7e7";

/// Discrete risk category derived from the probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    /// Probability below 40%
    Low,
    /// Probability from 40% up to (not including) 70%
    Medium,
    /// Probability of 70% or more
    High,
}

impl RiskTier {
    /// Display color for the tier
    pub fn color_token(&self) -> &'static str {
        match self {
            RiskTier::High => "#ef4444",
            RiskTier::Medium => "#f59e0b",
            RiskTier::Low => "#10b981",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskTier::Low => write!(f, "low"),
            RiskTier::Medium => write!(f, "medium"),
            RiskTier::High => write!(f, "high"),
        }
    }
}

/// Recommendation categories, one entry each per assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum RecommendationCategory {
    Lifestyle,
    MonitoringFrequency,
    ModelConfidence,
}

impl RecommendationCategory {
    pub fn title(&self) -> &'static str {
        match self {
            RecommendationCategory::Lifestyle => "Lifestyle",
            RecommendationCategory::MonitoringFrequency => "Frequency",
            RecommendationCategory::ModelConfidence => "AI Insight",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct Recommendation {
    pub category: RecommendationCategory,
    pub title: String,
    pub text: String,
}

/// One slice of the proportion chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct ChartSlice {
    pub id: String,
    pub value: f64,
    pub color: String,
}

/// Model identification shown with every result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct ModelBadge {
    pub name: String,
    pub version: String,
    pub disclaimer: String,
}

/// Renderer-ready presentation of one returned probability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct RiskAssessment {
    /// Probability in percent, clamped to [0, 100]
    pub probability_percent: f64,

    /// Probability rounded for the headline number
    pub display_percent: u8,

    pub tier: RiskTier,

    /// Short badge label, e.g. "Critical Risk"
    pub verdict_label: String,

    /// Conclusion headline
    pub headline: String,

    /// One-sentence narrative for the tier
    pub narrative: String,

    /// Status line, e.g. "No CVD Suspected"
    pub suspicion: String,

    pub color_token: String,

    /// Lifestyle, monitoring-frequency and model-confidence, in that order
    pub recommendations: Vec<Recommendation>,

    /// Risk slice followed by the remainder slice
    pub chart: Vec<ChartSlice>,

    /// General guidance, independent of tier
    pub guidance: Vec<String>,

    pub model: ModelBadge,
}

impl RiskAssessment {
    /// Recommendation for a category
    pub fn recommendation(&self, category: RecommendationCategory) -> Option<&Recommendation> {
        self.recommendations.iter().find(|r| r.category == category)
    }
}

/// Assessment plus the context of the prediction that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct RiskReport {
    /// Identifier of this submission
    pub submission_id: Uuid,

    pub generated_at: DateTime<Utc>,

    /// Binary verdict from the classifier; informational only
    pub is_cardio: bool,

    /// Status text returned by the prediction service
    pub upstream_status: String,

    pub assessment: RiskAssessment,
}
