//! API request/response types
//!
//! Extracted from mod.rs to keep the handler module focused. Every body
//! the service emits is one of these structures; errors are always the
//! structured [`ErrorResponse`], never a raw stack trace.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::schema::SchemaViolation;

/// Root endpoint navigation map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationResponse {
    /// Welcome message
    pub message: String,
    /// Path of the API description endpoint
    pub docs: String,
    /// Available endpoints by name
    pub endpoints: NavigationEndpoints,
}

/// Endpoint map inside the navigation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationEndpoints {
    /// Health check path
    pub health: String,
    /// Model metadata path
    pub model_info: String,
    /// Prediction path
    pub predict: String,
    /// Prometheus metrics path
    pub metrics: String,
}

/// Health check response
///
/// A liveness signal, not a readiness gate: it always succeeds, reporting
/// artifact availability as booleans.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status, always "healthy" while the process answers
    pub status: String,
    /// Current time, ISO-8601
    pub timestamp: String,
    /// Server run state
    pub server: String,
    /// Whether the prediction model artifact is loaded
    pub model_loaded: bool,
    /// Whether the scaler artifact is loaded
    pub scaler_loaded: bool,
}

/// API metadata and status response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiStatusResponse {
    /// Service name banner
    pub message: String,
    /// Crate version
    pub version: String,
    /// Run state, always "running"
    pub status: String,
    /// Whether the prediction model artifact is loaded
    pub model_loaded: bool,
}

/// Model metadata response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfoResponse {
    /// Kind of fitted model being served
    pub model_type: String,
    /// Number of input features
    pub features_count: usize,
    /// Required feature names in canonical order
    pub required_features: Vec<String>,
    /// Description of the output scale
    pub output_range: String,
    /// What the model does
    pub description: String,
}

/// Successful prediction response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    /// Quality score rounded to 2 decimal places
    pub predicted_quality: f64,
    /// Echo of the 11 submitted feature values keyed by name
    pub input_features: BTreeMap<String, f64>,
    /// Fixed success message
    pub message: String,
}

/// Structured error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Exact required keys absent from the payload, when that is the cause
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_features: Option<Vec<String>>,
    /// Required keys holding non-numeric values, when that is the cause
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invalid_features: Option<Vec<String>>,
}

impl ErrorResponse {
    /// Plain error with just a message
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            missing_features: None,
            invalid_features: None,
        }
    }
}

impl From<&SchemaViolation> for ErrorResponse {
    fn from(violation: &SchemaViolation) -> Self {
        Self {
            error: violation.message(),
            missing_features: (!violation.missing.is_empty()).then(|| violation.missing.clone()),
            invalid_features: (!violation.non_numeric.is_empty())
                .then(|| violation.non_numeric.clone()),
        }
    }
}

/// Static API description served at `/docs`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiDocsResponse {
    /// API title
    pub title: String,
    /// Crate version
    pub version: String,
    /// What the API does
    pub description: String,
    /// Per-endpoint documentation
    pub endpoints: Vec<EndpointDoc>,
}

/// One documented endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointDoc {
    /// HTTP method
    pub method: String,
    /// Route path
    pub path: String,
    /// One-line behavior summary
    pub description: String,
}
