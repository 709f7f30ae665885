// Wire models for the remote prediction service
pub mod prediction;

pub use prediction::{PredictRequest, PredictResponse, ProbabilityValue};
