use cardio_risk_data::models::prediction::PredictRequest;

use crate::entities::intake::IntakeRecord;

/// Conversion functions between domain entities and prediction service models
/// These functions follow the pattern convert_to_[target_layer]_[model_name]

/// Convert a validated intake record to the prediction service request body
pub fn convert_to_data_predict_request(record: &IntakeRecord) -> PredictRequest {
    PredictRequest {
        age: record.age,
        gender: record.gender.code(),
        height: record.height,
        weight: record.weight,
        ap_hi: record.systolic,
        ap_lo: record.diastolic,
        cholesterol: record.cholesterol.code(),
        gluc: record.glucose.code(),
        smoke: record.smokes,
        alco: record.drinks_alcohol,
        active: record.physically_active,
    }
}
