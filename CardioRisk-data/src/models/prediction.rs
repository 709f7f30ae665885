use serde::{Deserialize, Serialize};

use crate::client::UpstreamError;

/// Request body for `POST /predict` on the prediction service
///
/// Field names and encodings follow the service's patient schema:
/// gender is `1` for women and `2` for men, cholesterol and glucose are
/// ordinal levels `1..=3`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictRequest {
    /// Age in years
    pub age: u8,

    /// Gender code (1 = female, 2 = male)
    pub gender: u8,

    /// Height in centimeters
    pub height: f64,

    /// Weight in kilograms
    pub weight: f64,

    /// Systolic blood pressure (the higher number)
    pub ap_hi: u16,

    /// Diastolic blood pressure (the lower number)
    pub ap_lo: u16,

    /// Cholesterol level (1 = normal, 2 = above normal, 3 = well above normal)
    pub cholesterol: u8,

    /// Glucose level (1 = normal, 2 = above normal, 3 = well above normal)
    pub gluc: u8,

    /// Smoker
    pub smoke: bool,

    /// Drinks alcohol
    pub alco: bool,

    /// Physically active
    pub active: bool,
}

/// Probability as sent by the prediction service
///
/// The service formats it as a percentage string (`"73.40%"`); a bare
/// number is accepted as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProbabilityValue {
    Number(f64),
    Text(String),
}

/// Response body of `POST /predict`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    /// Binary verdict of the classifier (0 or 1)
    pub is_cardio: u8,

    /// Probability of cardiovascular disease, in percent
    pub probability: ProbabilityValue,

    /// Short status text from the service (e.g. "High Risk")
    #[serde(default)]
    pub status: String,
}

impl PredictResponse {
    /// Parse the probability into a percentage value
    ///
    /// The value is not range-checked here; the classifier clamps it.
    pub fn probability_percent(&self) -> Result<f64, UpstreamError> {
        let value = match &self.probability {
            ProbabilityValue::Number(n) => *n,
            ProbabilityValue::Text(text) => parse_percentage(text)?,
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(UpstreamError::MalformedResponse(format!(
                "probability is not a finite number: {}",
                value
            )))
        }
    }

    /// Whether the classifier flagged the patient
    pub fn is_cardio(&self) -> bool {
        self.is_cardio != 0
    }
}

/// Parse a percentage string such as `"73.40%"` or `" 12.5 "`
pub fn parse_percentage(text: &str) -> Result<f64, UpstreamError> {
    let trimmed = text.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();

    number.parse::<f64>().map_err(|_| {
        UpstreamError::MalformedResponse(format!("unparsable probability: {:?}", text))
    })
}
