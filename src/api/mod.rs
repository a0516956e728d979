//! HTTP API for wine quality inference
//!
//! Provides REST endpoints over the loaded artifacts using axum.
//!
//! ## Endpoints
//!
//! - `GET /` - Navigation and endpoint map
//! - `GET /health` - Liveness check with artifact availability
//! - `GET /docs` - Static API description
//! - `GET /metrics` - Prometheus-formatted metrics
//! - `GET /api/data` - API metadata and status
//! - `GET /api/info` - Model metadata (503 when the model is missing)
//! - `POST /api/predict` - Predict wine quality from 11 features
//!
//! ## Example
//!
//! ```rust,ignore
//! use catador::api::{create_router, AppState};
//!
//! let state = AppState::from_artifacts(artifacts);
//! let app = create_router(state);
//! axum::serve(listener, app).await?;
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{Map, Value};

use crate::{
    artifact::Artifacts,
    error::Result,
    metrics::MetricsCollector,
    model::{GbtRegressor, RegressionTree, TreeNode},
    pipeline,
    scaler::StandardScaler,
    schema::{self, FEATURE_COUNT, FEATURE_NAMES},
};

mod types;

pub use types::{
    ApiDocsResponse, ApiStatusResponse, EndpointDoc, ErrorResponse, HealthResponse,
    ModelInfoResponse, NavigationEndpoints, NavigationResponse, PredictResponse,
};

#[cfg(test)]
mod tests;

/// Fixed message returned with every successful prediction
const PREDICTION_SUCCESSFUL: &str = "prediction successful";

/// Diagnostic message when an artifact is missing at request time
const MODEL_NOT_LOADED: &str = "Model not loaded";

/// Application state shared across handlers
///
/// An explicitly constructed, immutable context: both artifacts are
/// `Option<Arc<_>>` so the unavailable state is representable and
/// testable, never ambient global state. No handler mutates it.
#[derive(Clone)]
pub struct AppState {
    /// Fitted scaling transform, `None` when loading failed
    scaler: Option<Arc<StandardScaler>>,
    /// Fitted regression model, `None` when loading failed
    model: Option<Arc<GbtRegressor>>,
    /// Metrics collector for monitoring
    metrics: MetricsCollector,
}

impl AppState {
    /// Create state from already-loaded artifacts
    #[must_use]
    pub fn new(scaler: StandardScaler, model: GbtRegressor) -> Self {
        Self {
            scaler: Some(Arc::new(scaler)),
            model: Some(Arc::new(model)),
            metrics: MetricsCollector::new(),
        }
    }

    /// Create state from the startup loader's (possibly partial) result
    #[must_use]
    pub fn from_artifacts(artifacts: Artifacts) -> Self {
        Self {
            scaler: artifacts.scaler,
            model: artifacts.model,
            metrics: MetricsCollector::new(),
        }
    }

    /// State with no artifacts loaded
    ///
    /// Mirrors a failed startup load; predict and model-info report
    /// service-unavailable while health keeps answering.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            scaler: None,
            model: None,
            metrics: MetricsCollector::new(),
        }
    }

    /// State backed by tiny handcrafted artifacts
    ///
    /// An identity scaler and a two-stump ensemble with known outputs, for
    /// demo serving and deterministic tests.
    ///
    /// # Errors
    ///
    /// Returns an error if the handcrafted artifacts fail validation.
    pub fn demo() -> Result<Self> {
        let scaler = StandardScaler::identity(FEATURE_COUNT);
        scaler.validate(FEATURE_COUNT)?;

        // base 5.0; alcohol < 10 costs 0.5, volatile acidity >= 0.6 costs 0.3
        let model = GbtRegressor {
            base_score: 5.0,
            trees: vec![
                RegressionTree {
                    nodes: vec![
                        TreeNode::Split {
                            feature: 10,
                            threshold: 10.0,
                            left: 1,
                            right: 2,
                        },
                        TreeNode::Leaf { value: -0.5 },
                        TreeNode::Leaf { value: 0.5 },
                    ],
                },
                RegressionTree {
                    nodes: vec![
                        TreeNode::Split {
                            feature: 1,
                            threshold: 0.6,
                            left: 1,
                            right: 2,
                        },
                        TreeNode::Leaf { value: 0.3 },
                        TreeNode::Leaf { value: -0.3 },
                    ],
                },
            ],
        };
        model.validate(FEATURE_COUNT)?;

        Ok(Self::new(scaler, model))
    }

    /// Whether the prediction model artifact is loaded
    #[must_use]
    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    /// Whether the scaler artifact is loaded
    #[must_use]
    pub fn has_scaler(&self) -> bool {
        self.scaler.is_some()
    }
}

/// Create the API router
///
/// # Arguments
///
/// * `state` - Application state with the loaded artifacts
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(navigation_handler))
        .route("/health", get(health_handler))
        .route("/docs", get(docs_handler))
        .route("/metrics", get(metrics_handler))
        .route("/api/data", get(api_status_handler))
        .route("/api/info", get(model_info_handler))
        .route("/api/predict", post(predict_handler))
        .with_state(state)
}

/// Root handler: API overview and endpoint navigation
async fn navigation_handler() -> Json<NavigationResponse> {
    Json(NavigationResponse {
        message: "Welcome to the Wine Quality API!".to_string(),
        docs: "/docs".to_string(),
        endpoints: NavigationEndpoints {
            health: "/health".to_string(),
            model_info: "/api/info".to_string(),
            predict: "/api/predict".to_string(),
            metrics: "/metrics".to_string(),
        },
    })
}

/// Health check handler
///
/// Always succeeds, even with both artifacts missing. Reports artifact
/// availability so monitoring can distinguish "up" from "ready".
async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        server: "running".to_string(),
        model_loaded: state.has_model(),
        scaler_loaded: state.has_scaler(),
    })
}

/// API metadata and status handler
async fn api_status_handler(State(state): State<AppState>) -> Json<ApiStatusResponse> {
    Json(ApiStatusResponse {
        message: "Wine Quality API".to_string(),
        version: crate::VERSION.to_string(),
        status: "running".to_string(),
        model_loaded: state.has_model(),
    })
}

/// Model metadata handler
///
/// Mirrors the predict path's dependency: unavailable when the model
/// artifact is missing.
async fn model_info_handler(
    State(state): State<AppState>,
) -> std::result::Result<Json<ModelInfoResponse>, (StatusCode, Json<ErrorResponse>)> {
    if !state.has_model() {
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse::new(MODEL_NOT_LOADED)),
        ));
    }

    Ok(Json(ModelInfoResponse {
        model_type: "GradientBoostingRegressor".to_string(),
        features_count: FEATURE_COUNT,
        required_features: FEATURE_NAMES.iter().map(ToString::to_string).collect(),
        output_range: "3-8 (wine quality score)".to_string(),
        description: "Predicts wine quality based on physicochemical properties".to_string(),
    }))
}

/// Wine quality prediction handler
///
/// Accepts any JSON object, validates it against the fixed feature schema,
/// runs the scale-then-predict pipeline, and echoes the submitted values
/// back with the rounded score. Extra keys are ignored.
async fn predict_handler(
    State(state): State<AppState>,
    Json(payload): Json<Map<String, Value>>,
) -> std::result::Result<Json<PredictResponse>, (StatusCode, Json<ErrorResponse>)> {
    let start = Instant::now();

    // Artifact availability first: no partial computation on a dead model
    let (scaler, model) = match (state.scaler.as_deref(), state.model.as_deref()) {
        (Some(scaler), Some(model)) => (scaler, model),
        _ => {
            state.metrics.record_failure();
            return Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse::new(MODEL_NOT_LOADED)),
            ));
        },
    };

    let values = match schema::validate_payload(&payload) {
        Ok(values) => values,
        Err(violation) => {
            state.metrics.record_failure();
            return Err((StatusCode::BAD_REQUEST, Json(ErrorResponse::from(&violation))));
        },
    };

    let predicted_quality = pipeline::predict_quality(scaler, model, &values);
    state.metrics.record_success(start.elapsed());

    let input_features: BTreeMap<String, f64> = FEATURE_NAMES
        .iter()
        .zip(values.iter())
        .map(|(name, value)| ((*name).to_string(), *value))
        .collect();

    Ok(Json(PredictResponse {
        predicted_quality,
        input_features,
        message: PREDICTION_SUCCESSFUL.to_string(),
    }))
}

/// Metrics handler - returns Prometheus-formatted metrics
async fn metrics_handler(State(state): State<AppState>) -> String {
    state.metrics.to_prometheus()
}

/// Static API description handler
async fn docs_handler() -> Json<ApiDocsResponse> {
    Json(ApiDocsResponse {
        title: "Wine Quality API".to_string(),
        version: crate::VERSION.to_string(),
        description: "Predicts wine quality based on physicochemical properties".to_string(),
        endpoints: vec![
            EndpointDoc {
                method: "GET".to_string(),
                path: "/".to_string(),
                description: "API overview and endpoint navigation".to_string(),
            },
            EndpointDoc {
                method: "GET".to_string(),
                path: "/health".to_string(),
                description: "Liveness check with artifact availability".to_string(),
            },
            EndpointDoc {
                method: "GET".to_string(),
                path: "/metrics".to_string(),
                description: "Prometheus-formatted service metrics".to_string(),
            },
            EndpointDoc {
                method: "GET".to_string(),
                path: "/api/data".to_string(),
                description: "API metadata and status".to_string(),
            },
            EndpointDoc {
                method: "GET".to_string(),
                path: "/api/info".to_string(),
                description: "Model metadata and required features".to_string(),
            },
            EndpointDoc {
                method: "POST".to_string(),
                path: "/api/predict".to_string(),
                description: "Predict wine quality from 11 physicochemical features".to_string(),
            },
        ],
    })
}
