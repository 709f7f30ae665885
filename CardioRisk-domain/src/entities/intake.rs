use std::fmt;

use serde::{Deserialize, Serialize};

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

/// Raw form submission: field name to untyped value
pub type RawIntake = serde_json::Map<String, serde_json::Value>;

/// Gender as understood by the model
///
/// Encoded on the wire as `1` (female) and `2` (male).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    /// Code sent to the prediction service
    pub fn code(&self) -> u8 {
        match self {
            Gender::Female => 1,
            Gender::Male => 2,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Gender::Female),
            2 => Some(Gender::Male),
            _ => None,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "female" => Some(Gender::Female),
            "male" => Some(Gender::Male),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Female => "Female",
            Gender::Male => "Male",
        }
    }
}

/// Ordinal level used for cholesterol and glucose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Normal,
    AboveNormal,
    WellAboveNormal,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Normal, Level::AboveNormal, Level::WellAboveNormal];

    /// Code sent to the prediction service (1..=3)
    pub fn code(&self) -> u8 {
        match self {
            Level::Normal => 1,
            Level::AboveNormal => 2,
            Level::WellAboveNormal => 3,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Level::Normal),
            2 => Some(Level::AboveNormal),
            3 => Some(Level::WellAboveNormal),
            _ => None,
        }
    }

    /// Parse `normal`, `above_normal` or `well_above_normal`; hyphens and
    /// spaces work as separators too
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized: String = name
            .trim()
            .to_ascii_lowercase()
            .chars()
            .map(|c| if c == '-' || c == ' ' { '_' } else { c })
            .collect();

        match normalized.as_str() {
            "normal" => Some(Level::Normal),
            "above_normal" => Some(Level::AboveNormal),
            "well_above_normal" => Some(Level::WellAboveNormal),
            _ => None,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Level::Normal => "normal",
            Level::AboveNormal => "above_normal",
            Level::WellAboveNormal => "well_above_normal",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Level::Normal => "Normal",
            Level::AboveNormal => "Above Normal",
            Level::WellAboveNormal => "Well Above Normal",
        }
    }
}

/// Fields of the intake form, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum IntakeField {
    Age,
    Height,
    Weight,
    Gender,
    Systolic,
    Diastolic,
    Cholesterol,
    Glucose,
    Smokes,
    DrinksAlcohol,
    PhysicallyActive,
}

impl IntakeField {
    pub const ALL: [IntakeField; 11] = [
        IntakeField::Age,
        IntakeField::Height,
        IntakeField::Weight,
        IntakeField::Gender,
        IntakeField::Systolic,
        IntakeField::Diastolic,
        IntakeField::Cholesterol,
        IntakeField::Glucose,
        IntakeField::Smokes,
        IntakeField::DrinksAlcohol,
        IntakeField::PhysicallyActive,
    ];

    /// Canonical key in a raw submission
    pub fn key(&self) -> &'static str {
        match self {
            IntakeField::Age => "age",
            IntakeField::Height => "height",
            IntakeField::Weight => "weight",
            IntakeField::Gender => "gender",
            IntakeField::Systolic => "systolic",
            IntakeField::Diastolic => "diastolic",
            IntakeField::Cholesterol => "cholesterol",
            IntakeField::Glucose => "glucose",
            IntakeField::Smokes => "smokes",
            IntakeField::DrinksAlcohol => "drinks_alcohol",
            IntakeField::PhysicallyActive => "physically_active",
        }
    }

    /// Other accepted keys: hyphenated spellings and prediction service names
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            IntakeField::Systolic => &["ap_hi"],
            IntakeField::Diastolic => &["ap_lo"],
            IntakeField::Glucose => &["gluc"],
            IntakeField::Smokes => &["smoke"],
            IntakeField::DrinksAlcohol => &["drinks-alcohol", "alco"],
            IntakeField::PhysicallyActive => &["physically-active", "active"],
            _ => &[],
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|field| field.key() == key)
    }

    pub fn label(&self) -> &'static str {
        match self {
            IntakeField::Age => "Age",
            IntakeField::Height => "Height",
            IntakeField::Weight => "Weight",
            IntakeField::Gender => "Gender",
            IntakeField::Systolic => "Systolic BP",
            IntakeField::Diastolic => "Diastolic BP",
            IntakeField::Cholesterol => "Cholesterol",
            IntakeField::Glucose => "Glucose",
            IntakeField::Smokes => "Smoke",
            IntakeField::DrinksAlcohol => "Alcohol",
            IntakeField::PhysicallyActive => "Active",
        }
    }

    /// Help text shown under the input
    pub fn description(&self) -> &'static str {
        match self {
            IntakeField::Age => "Age must be between 18 and 120 years.",
            IntakeField::Height => "Enter height in centimeters (100-250 cm).",
            IntakeField::Weight => "Enter weight in kilograms (30-300 kg).",
            IntakeField::Gender => "Select gender.",
            IntakeField::Systolic => "The top number in your blood pressure reading.",
            IntakeField::Diastolic => "The bottom number in your blood pressure reading.",
            IntakeField::Cholesterol => "Select your cholesterol level.",
            IntakeField::Glucose => "Select your glucose level.",
            IntakeField::Smokes => "Do you currently smoke?",
            IntakeField::DrinksAlcohol => "Do you consume alcohol?",
            IntakeField::PhysicallyActive => "Are you physically active?",
        }
    }

    /// Lifestyle flags are opt-in and default to `false`
    pub fn is_flag(&self) -> bool {
        matches!(
            self,
            IntakeField::Smokes | IntakeField::DrinksAlcohol | IntakeField::PhysicallyActive
        )
    }
}

impl fmt::Display for IntakeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Kind of validation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub enum FieldErrorKind {
    /// Value could not be coerced to the field's type
    #[serde(rename = "type_error")]
    Type,
    /// Value outside the allowed bounds or set
    #[serde(rename = "range_error")]
    Range,
    /// Required field absent or blank
    #[serde(rename = "missing_error")]
    Missing,
    /// Systolic not greater than diastolic
    #[serde(rename = "ordering_error")]
    Ordering,
}

/// A validation failure attributed to one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct FieldError {
    /// Offending field
    pub field: IntakeField,
    /// What went wrong
    pub kind: FieldErrorKind,
    /// Message to show beside the input
    pub message: String,
}

impl FieldError {
    pub fn new(field: IntakeField, kind: FieldErrorKind, message: impl Into<String>) -> Self {
        Self {
            field,
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validated patient measurements for one submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct IntakeRecord {
    /// Age in years (18-120)
    pub age: u8,

    /// Height in centimeters (100-250)
    pub height: f64,

    /// Weight in kilograms (30-300)
    pub weight: f64,

    pub gender: Gender,

    /// Systolic blood pressure in mmHg (60-250), always above diastolic
    pub systolic: u16,

    /// Diastolic blood pressure in mmHg (40-150)
    pub diastolic: u16,

    pub cholesterol: Level,

    pub glucose: Level,

    pub smokes: bool,

    pub drinks_alcohol: bool,

    pub physically_active: bool,
}

/// One selectable option of a choice input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
}

/// How a field is entered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputKind {
    Integer { min: i64, max: i64 },
    Decimal { min: f64, max: f64, step: f64 },
    Choice { options: Vec<ChoiceOption> },
    Toggle,
}

/// Descriptor of one intake form field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub struct FieldSpec {
    pub field: IntakeField,
    pub label: String,
    pub description: String,
    pub input: InputKind,
    pub required: bool,
}
