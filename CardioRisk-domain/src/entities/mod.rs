// Domain entities and value objects
pub mod assessment;
pub mod intake;
pub mod conversions;

// Re-export common types for easier imports
pub use assessment::{
    ChartSlice, ModelBadge, Recommendation, RecommendationCategory, RiskAssessment, RiskReport, RiskTier,
    TRACK_COLOR,
};
pub use intake::{
    ChoiceOption, FieldError, FieldErrorKind, FieldSpec, Gender, InputKind, IntakeField, IntakeRecord, Level,
    RawIntake,
};
