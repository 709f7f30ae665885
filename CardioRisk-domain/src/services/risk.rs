use std::env;

use tracing::{info, warn};

use crate::entities::assessment::{
    ChartSlice, ModelBadge, Recommendation, RecommendationCategory, RiskAssessment, RiskTier, TRACK_COLOR,
};

/// Lowest probability (percent) classified as medium risk
pub const MEDIUM_RISK_THRESHOLD: f64 = 40.0;

/// Lowest probability (percent) classified as high risk
pub const HIGH_RISK_THRESHOLD: f64 = 70.0;

pub const DEFAULT_MODEL_ACCURACY: f64 = 73.4;
pub const DEFAULT_MODEL_NAME: &str = "Gradient Classifier";
pub const DEFAULT_MODEL_VERSION: &str = "v1.0.2";
pub const MODEL_DISCLAIMER: &str = "Research Only: Non-Diagnostic AI";

/// General guidance shown with every result
pub const GENERAL_GUIDANCE: [&str; 2] = ["Keep Systolic BP below 130 mmHg.", "Monitor LDL levels via bloodwork."];

/// Copy associated with one tier
#[derive(Debug)]
struct TierCopy {
    tier: RiskTier,
    /// Inclusive lower bound in percent
    floor: f64,
    verdict_label: &'static str,
    headline: &'static str,
    narrative: &'static str,
    suspicion: &'static str,
    lifestyle: &'static str,
    monitoring: &'static str,
}

/// Tiers from highest floor to lowest; the first floor not above the
/// probability wins
static TIER_TABLE: [TierCopy; 3] = [
    TierCopy {
        tier: RiskTier::High,
        floor: HIGH_RISK_THRESHOLD,
        verdict_label: "Critical Risk",
        headline: "CVD Probability High.",
        narrative: "Significant clinical markers detected. Consult a cardiologist immediately.",
        suspicion: "High Chance CVD Suspected",
        lifestyle: "Strict Sodium <1.5g/day.",
        monitoring: "Daily BP monitoring.",
    },
    TierCopy {
        tier: RiskTier::Medium,
        floor: MEDIUM_RISK_THRESHOLD,
        verdict_label: "Elevated Risk",
        headline: "CVD Signs Detected.",
        narrative: "Emerging indicators suggest a potential condition. Schedule a specialist screening.",
        suspicion: "Mild CVD Suspected",
        lifestyle: "150m Cardio/week.",
        monitoring: "Weekly BP checks.",
    },
    TierCopy {
        tier: RiskTier::Low,
        floor: 0.0,
        verdict_label: "Minimal Risk",
        headline: "CVD Risk is Low.",
        narrative: "Metrics are within normal ranges. You likely do not have cardiovascular disease.",
        suspicion: "No CVD Suspected",
        lifestyle: "Maintain Fiber intake.",
        monitoring: "Annual Screenings.",
    },
];

/// Model facts shown alongside a result
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierConfig {
    /// Published accuracy of the model, in percent
    pub model_accuracy_percent: f64,
    pub model_name: String,
    pub model_version: String,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            model_accuracy_percent: DEFAULT_MODEL_ACCURACY,
            model_name: DEFAULT_MODEL_NAME.to_string(),
            model_version: DEFAULT_MODEL_VERSION.to_string(),
        }
    }
}

impl ClassifierConfig {
    /// Load from `CARDIO_MODEL_ACCURACY`, `CARDIO_MODEL_NAME` and
    /// `CARDIO_MODEL_VERSION`, falling back to defaults
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(raw) = env::var("CARDIO_MODEL_ACCURACY") {
            match raw.trim().parse::<f64>() {
                Ok(accuracy) if (0.0..=100.0).contains(&accuracy) => config.model_accuracy_percent = accuracy,
                _ => warn!(
                    "Ignoring invalid CARDIO_MODEL_ACCURACY '{}', using {}",
                    raw, config.model_accuracy_percent
                ),
            }
        }
        if let Ok(name) = env::var("CARDIO_MODEL_NAME") {
            if !name.trim().is_empty() {
                config.model_name = name.trim().to_string();
            }
        }
        if let Ok(version) = env::var("CARDIO_MODEL_VERSION") {
            if !version.trim().is_empty() {
                config.model_version = version.trim().to_string();
            }
        }

        info!(
            "Classifier presentation: {} {} ({}% accuracy)",
            config.model_name, config.model_version, config.model_accuracy_percent
        );
        config
    }
}

/// Turns a probability into a renderer-ready assessment
#[derive(Debug, Clone, Default)]
pub struct RiskClassifier {
    config: ClassifierConfig,
}

impl RiskClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify a probability in percent
    ///
    /// Out-of-range values are clamped to [0, 100] and NaN is treated as 0.
    pub fn classify(&self, probability_percent: f64) -> RiskAssessment {
        let probability = clamp_probability(probability_percent);
        let copy = tier_copy(probability);

        let recommendations = vec![
            Recommendation {
                category: RecommendationCategory::Lifestyle,
                title: RecommendationCategory::Lifestyle.title().to_string(),
                text: copy.lifestyle.to_string(),
            },
            Recommendation {
                category: RecommendationCategory::MonitoringFrequency,
                title: RecommendationCategory::MonitoringFrequency.title().to_string(),
                text: copy.monitoring.to_string(),
            },
            Recommendation {
                category: RecommendationCategory::ModelConfidence,
                title: RecommendationCategory::ModelConfidence.title().to_string(),
                text: format!("Model accuracy: {}%.", self.config.model_accuracy_percent),
            },
        ];

        let color = copy.tier.color_token();
        let chart = vec![
            ChartSlice {
                id: "risk".to_string(),
                value: probability,
                color: color.to_string(),
            },
            ChartSlice {
                id: "remaining".to_string(),
                value: 100.0 - probability,
                color: TRACK_COLOR.to_string(),
            },
        ];

        RiskAssessment {
            probability_percent: probability,
            display_percent: probability.round() as u8,
            tier: copy.tier,
            verdict_label: copy.verdict_label.to_string(),
            headline: copy.headline.to_string(),
            narrative: copy.narrative.to_string(),
            suspicion: copy.suspicion.to_string(),
            color_token: color.to_string(),
            recommendations,
            chart,
            guidance: GENERAL_GUIDANCE.iter().map(|g| g.to_string()).collect(),
            model: ModelBadge {
                name: self.config.model_name.clone(),
                version: self.config.model_version.clone(),
                disclaimer: MODEL_DISCLAIMER.to_string(),
            },
        }
    }
}

/// Classify with the default model facts
pub fn classify(probability_percent: f64) -> RiskAssessment {
    RiskClassifier::default().classify(probability_percent)
}

/// Tier for a probability in percent; the value is clamped first
pub fn tier_for(probability_percent: f64) -> RiskTier {
    tier_copy(clamp_probability(probability_percent)).tier
}

fn tier_copy(probability: f64) -> &'static TierCopy {
    TIER_TABLE
        .iter()
        .find(|entry| probability >= entry.floor)
        .unwrap_or(&TIER_TABLE[TIER_TABLE.len() - 1])
}

/// Force a probability into [0, 100]
pub fn clamp_probability(probability_percent: f64) -> f64 {
    if probability_percent.is_nan() {
        warn!("Probability is NaN, treating as 0");
        return 0.0;
    }
    if !(0.0..=100.0).contains(&probability_percent) {
        warn!("Probability {} outside 0-100, clamping", probability_percent);
    }
    probability_percent.clamp(0.0, 100.0)
}
