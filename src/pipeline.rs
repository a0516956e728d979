//! Validated-input to prediction pipeline
//!
//! The single linear path of the service: assemble the canonical vector,
//! apply the fitted scaling transform, run the ensemble, round. Both
//! artifacts are read-only here; the pipeline holds no state of its own.

use crate::model::GbtRegressor;
use crate::scaler::StandardScaler;
use crate::schema::FEATURE_COUNT;

/// Round half away from zero at the given number of decimal places
///
/// `f64::round` rounds halves away from zero, so 0.125 becomes 0.13 and
/// -0.125 becomes -0.13 at two places.
#[must_use]
pub fn round_to_places(value: f64, places: u32) -> f64 {
    let factor = 10_f64.powi(places.try_into().unwrap_or(i32::MAX));
    (value * factor).round() / factor
}

/// Produce the rounded quality score for a validated feature vector
///
/// Deterministic given the loaded artifacts: scaling and tree traversal
/// are pure functions, so identical inputs yield identical outputs.
#[must_use]
pub fn predict_quality(
    scaler: &StandardScaler,
    model: &GbtRegressor,
    features: &[f64; FEATURE_COUNT],
) -> f64 {
    let scaled = scaler.transform(features);
    round_to_places(model.predict(&scaled), 2)
}
