//! Fixed feature schema and payload validation
//!
//! The model was trained on exactly 11 physicochemical measurements in a
//! fixed order. That order is load-bearing: position `i` of the assembled
//! vector must line up with feature `i` of the fitted scaler and model.
//!
//! Validation is a pure function from an untyped JSON object to either a
//! canonically-ordered vector or the exact set of offending key names, so
//! it can be exercised without any HTTP machinery.

use serde_json::{Map, Value};

/// Number of features the model was trained on
pub const FEATURE_COUNT: usize = 11;

/// Canonical feature order, matching the training pipeline
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "fixed acidity",
    "volatile acidity",
    "citric acid",
    "residual sugar",
    "chlorides",
    "free sulfur dioxide",
    "total sulfur dioxide",
    "density",
    "pH",
    "sulphates",
    "alcohol",
];

/// Why a payload failed schema validation
///
/// Carries the exact key names so callers can self-correct, not just a
/// boolean. Both lists are in canonical feature order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// Required keys absent from the payload
    pub missing: Vec<String>,
    /// Required keys present but holding a non-numeric value
    pub non_numeric: Vec<String>,
}

impl SchemaViolation {
    /// Render a single diagnostic message covering both failure kinds
    #[must_use]
    pub fn message(&self) -> String {
        match (self.missing.is_empty(), self.non_numeric.is_empty()) {
            (false, true) => format!("Missing features: {:?}", self.missing),
            (true, false) => format!("Non-numeric features: {:?}", self.non_numeric),
            _ => format!(
                "Missing features: {:?}; non-numeric features: {:?}",
                self.missing, self.non_numeric
            ),
        }
    }
}

/// Validate a JSON object against the fixed feature schema
///
/// Returns the 11 values in canonical order on success. Extra keys are
/// ignored. Integer JSON values are accepted as numeric; strings, nulls,
/// booleans, arrays, and objects are not.
///
/// # Errors
///
/// Returns a [`SchemaViolation`] listing every missing key and every
/// present-but-non-numeric key, no more, no fewer.
pub fn validate_payload(payload: &Map<String, Value>) -> Result<[f64; FEATURE_COUNT], SchemaViolation> {
    let mut values = [0.0_f64; FEATURE_COUNT];
    let mut missing = Vec::new();
    let mut non_numeric = Vec::new();

    for (slot, name) in values.iter_mut().zip(FEATURE_NAMES.iter()) {
        match payload.get(*name) {
            None => missing.push((*name).to_string()),
            Some(value) => match value.as_f64() {
                Some(number) => *slot = number,
                None => non_numeric.push((*name).to_string()),
            },
        }
    }

    if missing.is_empty() && non_numeric.is_empty() {
        Ok(values)
    } else {
        Err(SchemaViolation {
            missing,
            non_numeric,
        })
    }
}
