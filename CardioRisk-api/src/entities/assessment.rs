use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use cardio_risk_domain::entities::{FieldSpec, IntakeRecord};

/// Intake form submission
///
/// Values may be numbers, booleans or the strings a form produces. Blank
/// values count as missing. Prediction service names (`ap_hi`, `ap_lo`,
/// `gluc`, `smoke`, `alco`, `active`) are accepted as aliases.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct IntakeSubmission {
    /// Age in years (18-120)
    #[schema(example = 45)]
    pub age: Option<Value>,

    /// Height in centimeters (100-250)
    #[schema(example = 170)]
    pub height: Option<Value>,

    /// Weight in kilograms (30-300)
    #[schema(example = 75)]
    pub weight: Option<Value>,

    /// `female`, `male`, or the codes 1 and 2
    #[schema(example = "male")]
    pub gender: Option<Value>,

    /// Systolic blood pressure in mmHg (60-250)
    #[schema(example = 120)]
    pub systolic: Option<Value>,

    /// Diastolic blood pressure in mmHg (40-150)
    #[schema(example = 80)]
    pub diastolic: Option<Value>,

    /// `normal`, `above_normal`, `well_above_normal` or 1-3
    #[schema(example = "normal")]
    pub cholesterol: Option<Value>,

    /// `normal`, `above_normal`, `well_above_normal` or 1-3
    #[schema(example = "normal")]
    pub glucose: Option<Value>,

    /// Defaults to false
    #[schema(example = false)]
    pub smokes: Option<Value>,

    /// Defaults to false
    #[schema(example = false)]
    pub drinks_alcohol: Option<Value>,

    /// Defaults to false
    #[schema(example = true)]
    pub physically_active: Option<Value>,
}

/// Intake form descriptor
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IntakeFormResponse {
    /// Fields in display order
    pub fields: Vec<FieldSpec>,
}

/// Result of a successful validation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ValidationResponse {
    pub valid: bool,
    /// Normalized record that would be sent for prediction
    pub record: IntakeRecord,
}

/// State after a reset
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ResetResponse {
    /// Always `intake`
    pub state: String,
    /// Fields in display order
    pub form: Vec<FieldSpec>,
}
