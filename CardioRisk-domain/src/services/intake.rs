use serde_json::Value;
use validator::Validate;

use crate::entities::intake::{
    ChoiceOption, FieldError, FieldErrorKind, FieldSpec, Gender, InputKind, IntakeField, IntakeRecord, Level,
    RawIntake,
};

pub const AGE_RANGE: (i64, i64) = (18, 120);
pub const HEIGHT_RANGE: (f64, f64) = (100.0, 250.0);
pub const WEIGHT_RANGE: (f64, f64) = (30.0, 300.0);
pub const SYSTOLIC_RANGE: (i64, i64) = (60, 250);
pub const DIASTOLIC_RANGE: (i64, i64) = (40, 150);

/// Numeric fields after coercion, before bound checks
///
/// A field is `None` when it was missing or could not be coerced; that
/// failure has already been recorded.
#[derive(Debug, Default, Validate)]
struct MeasurementDraft {
    #[validate(range(min = 18, max = 120, message = "Age must be between 18 and 120 years"))]
    age: Option<i32>,

    #[validate(range(min = 100.0, max = 250.0, message = "Height must be between 100 and 250 cm"))]
    height: Option<f64>,

    #[validate(range(min = 30.0, max = 300.0, message = "Weight must be between 30 and 300 kg"))]
    weight: Option<f64>,

    #[validate(range(min = 60, max = 250, message = "Systolic BP must be between 60 and 250 mmHg"))]
    systolic: Option<i32>,

    #[validate(range(min = 40, max = 150, message = "Diastolic BP must be between 40 and 150 mmHg"))]
    diastolic: Option<i32>,
}

/// Validate a raw form submission
///
/// Returns the normalized record, or every field error found ordered by
/// form field order. Lifestyle flags default to `false` when absent.
pub fn validate_intake(raw: &RawIntake) -> Result<IntakeRecord, Vec<FieldError>> {
    let mut errors = Vec::new();

    let draft = MeasurementDraft {
        age: required(raw, IntakeField::Age, coerce_integer, &mut errors),
        height: required(raw, IntakeField::Height, coerce_decimal, &mut errors),
        weight: required(raw, IntakeField::Weight, coerce_decimal, &mut errors),
        systolic: required(raw, IntakeField::Systolic, coerce_integer, &mut errors),
        diastolic: required(raw, IntakeField::Diastolic, coerce_integer, &mut errors),
    };
    let gender = required(raw, IntakeField::Gender, coerce_gender, &mut errors);
    let cholesterol = required(raw, IntakeField::Cholesterol, coerce_level, &mut errors);
    let glucose = required(raw, IntakeField::Glucose, coerce_level, &mut errors);
    let smokes = flag(raw, IntakeField::Smokes, &mut errors);
    let drinks_alcohol = flag(raw, IntakeField::DrinksAlcohol, &mut errors);
    let physically_active = flag(raw, IntakeField::PhysicallyActive, &mut errors);

    if let Err(range_errors) = draft.validate() {
        for (key, field_errors) in range_errors.field_errors() {
            let (Some(field), Some(first)) = (IntakeField::from_key(key), field_errors.first()) else {
                continue;
            };
            let message = first
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{} is out of range", field.label()));
            errors.push(FieldError::new(field, FieldErrorKind::Range, message));
        }
    }

    // Ordering is only meaningful once both pressures passed their own checks
    if let (Some(systolic), Some(diastolic)) = (draft.systolic, draft.diastolic) {
        let pressures_valid = !errors
            .iter()
            .any(|e| matches!(e.field, IntakeField::Systolic | IntakeField::Diastolic));
        if pressures_valid && systolic <= diastolic {
            errors.push(FieldError::new(
                IntakeField::Systolic,
                FieldErrorKind::Ordering,
                "Systolic BP must be greater than Diastolic BP",
            ));
        }
    }

    errors.sort_by_key(|e| e.field);

    if errors.is_empty() {
        if let (Some(age), Some(height), Some(weight), Some(systolic), Some(diastolic), Some(gender), Some(cholesterol), Some(glucose)) = (
            draft.age.and_then(|v| u8::try_from(v).ok()),
            draft.height,
            draft.weight,
            draft.systolic.and_then(|v| u16::try_from(v).ok()),
            draft.diastolic.and_then(|v| u16::try_from(v).ok()),
            gender,
            cholesterol,
            glucose,
        ) {
            return Ok(IntakeRecord {
                age,
                height,
                weight,
                gender,
                systolic,
                diastolic,
                cholesterol,
                glucose,
                smokes,
                drinks_alcohol,
                physically_active,
            });
        }
    }

    debug_assert!(!errors.is_empty(), "an incomplete draft always records an error");
    Err(errors)
}

/// Descriptor of every intake field, in form order
pub fn intake_form() -> Vec<FieldSpec> {
    IntakeField::ALL
        .iter()
        .map(|&field| FieldSpec {
            field,
            label: field.label().to_string(),
            description: field.description().to_string(),
            input: input_kind(field),
            required: !field.is_flag(),
        })
        .collect()
}

fn input_kind(field: IntakeField) -> InputKind {
    match field {
        IntakeField::Age => InputKind::Integer { min: AGE_RANGE.0, max: AGE_RANGE.1 },
        IntakeField::Height => InputKind::Decimal { min: HEIGHT_RANGE.0, max: HEIGHT_RANGE.1, step: 1.0 },
        IntakeField::Weight => InputKind::Decimal { min: WEIGHT_RANGE.0, max: WEIGHT_RANGE.1, step: 0.1 },
        IntakeField::Systolic => InputKind::Integer { min: SYSTOLIC_RANGE.0, max: SYSTOLIC_RANGE.1 },
        IntakeField::Diastolic => InputKind::Integer { min: DIASTOLIC_RANGE.0, max: DIASTOLIC_RANGE.1 },
        IntakeField::Gender => InputKind::Choice {
            options: [Gender::Female, Gender::Male]
                .iter()
                .map(|g| ChoiceOption {
                    value: g.code().to_string(),
                    label: g.label().to_string(),
                })
                .collect(),
        },
        IntakeField::Cholesterol | IntakeField::Glucose => InputKind::Choice {
            options: Level::ALL
                .iter()
                .map(|level| ChoiceOption {
                    value: level.code().to_string(),
                    label: level.label().to_string(),
                })
                .collect(),
        },
        IntakeField::Smokes | IntakeField::DrinksAlcohol | IntakeField::PhysicallyActive => InputKind::Toggle,
    }
}

/// Find the value for a field; blank values count as absent
fn lookup(raw: &RawIntake, field: IntakeField) -> Option<&Value> {
    std::iter::once(field.key())
        .chain(field.aliases().iter().copied())
        .find_map(|key| raw.get(key).filter(|value| !is_blank(value)))
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn required<T>(
    raw: &RawIntake,
    field: IntakeField,
    coerce: fn(IntakeField, &Value) -> Result<T, FieldError>,
    errors: &mut Vec<FieldError>,
) -> Option<T> {
    let Some(value) = lookup(raw, field) else {
        errors.push(FieldError::new(
            field,
            FieldErrorKind::Missing,
            format!("{} is required", field.label()),
        ));
        return None;
    };

    match coerce(field, value) {
        Ok(coerced) => Some(coerced),
        Err(error) => {
            errors.push(error);
            None
        }
    }
}

fn flag(raw: &RawIntake, field: IntakeField, errors: &mut Vec<FieldError>) -> bool {
    match lookup(raw, field).map(|value| coerce_bool(field, value)) {
        None => false,
        Some(Ok(flag)) => flag,
        Some(Err(error)) => {
            errors.push(error);
            false
        }
    }
}

fn parse_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
}

fn coerce_decimal(field: IntakeField, value: &Value) -> Result<f64, FieldError> {
    parse_number(value).ok_or_else(|| {
        FieldError::new(field, FieldErrorKind::Type, format!("{} must be a number", field.label()))
    })
}

fn coerce_integer(field: IntakeField, value: &Value) -> Result<i32, FieldError> {
    let number = coerce_decimal(field, value)?;
    if number.fract() != 0.0 {
        return Err(FieldError::new(
            field,
            FieldErrorKind::Type,
            format!("{} must be a whole number", field.label()),
        ));
    }
    // Saturating cast; anything this large fails the range check
    Ok(number as i32)
}

fn coerce_gender(field: IntakeField, value: &Value) -> Result<Gender, FieldError> {
    let parsed = match value {
        Value::String(s) => Gender::from_name(s).or_else(|| s.trim().parse::<i64>().ok().and_then(Gender::from_code)),
        Value::Number(n) => n.as_i64().and_then(Gender::from_code),
        _ => {
            return Err(FieldError::new(field, FieldErrorKind::Type, "Gender must be a text value"));
        }
    };

    parsed.ok_or_else(|| FieldError::new(field, FieldErrorKind::Range, "Gender must be female or male"))
}

fn coerce_level(field: IntakeField, value: &Value) -> Result<Level, FieldError> {
    let parsed = match value {
        Value::String(s) => Level::from_name(s).or_else(|| s.trim().parse::<i64>().ok().and_then(Level::from_code)),
        Value::Number(n) => n.as_i64().and_then(Level::from_code),
        _ => {
            return Err(FieldError::new(
                field,
                FieldErrorKind::Type,
                format!("{} must be a level", field.label()),
            ));
        }
    };

    parsed.ok_or_else(|| {
        FieldError::new(
            field,
            FieldErrorKind::Range,
            format!("{} must be one of normal, above normal, well above normal", field.label()),
        )
    })
}

fn coerce_bool(field: IntakeField, value: &Value) -> Result<bool, FieldError> {
    let parsed = match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Some(true),
            "false" | "no" | "off" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    };

    parsed.ok_or_else(|| FieldError::new(field, FieldErrorKind::Type, format!("{} must be yes or no", field.label())))
}
