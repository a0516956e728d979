//! Artifact loading at process startup
//!
//! Both fitted artifacts are deserialized exactly once, synchronously,
//! before the server starts accepting requests. Loading is fail-soft: a
//! missing or malformed artifact leaves its slot empty instead of aborting
//! the process, so health and navigation endpoints stay reachable for
//! diagnostics while predict and model-info report unavailable.

use std::path::Path;
use std::sync::Arc;

use crate::error::{CatadorError, Result};
use crate::model::GbtRegressor;
use crate::scaler::StandardScaler;
use crate::schema::FEATURE_COUNT;

/// The process-wide artifact pair, loaded once and shared read-only
#[derive(Debug, Clone, Default)]
pub struct Artifacts {
    /// Fitted scaling transform, `None` when loading failed
    pub scaler: Option<Arc<StandardScaler>>,
    /// Fitted regression model, `None` when loading failed
    pub model: Option<Arc<GbtRegressor>>,
}

impl Artifacts {
    /// Load both artifacts, keeping the process alive on failure
    ///
    /// Each failure is logged at WARN and leaves the corresponding slot
    /// `None`; dependent endpoints then report service-unavailable.
    #[must_use]
    pub fn load(model_path: &Path, scaler_path: &Path) -> Self {
        let model = match load_model(model_path) {
            Ok(model) => {
                tracing::info!(path = %model_path.display(), trees = model.trees.len(), "model loaded");
                Some(Arc::new(model))
            },
            Err(e) => {
                tracing::warn!(path = %model_path.display(), error = %e, "model unavailable");
                None
            },
        };
        let scaler = match load_scaler(scaler_path) {
            Ok(scaler) => {
                tracing::info!(path = %scaler_path.display(), "scaler loaded");
                Some(Arc::new(scaler))
            },
            Err(e) => {
                tracing::warn!(path = %scaler_path.display(), error = %e, "scaler unavailable");
                None
            },
        };
        Self { scaler, model }
    }

    /// Whether both artifacts are present
    #[must_use]
    pub fn complete(&self) -> bool {
        self.scaler.is_some() && self.model.is_some()
    }
}

/// Strictly load and validate the model artifact
///
/// # Errors
///
/// Returns `IoError` when the file is unreadable, `FormatError` when the
/// JSON does not parse, `InvalidShape` when the ensemble is unsound.
pub fn load_model(path: &Path) -> Result<GbtRegressor> {
    let content = std::fs::read_to_string(path).map_err(|e| CatadorError::IoError {
        message: format!("failed to read model '{}': {e}", path.display()),
    })?;
    let model: GbtRegressor =
        serde_json::from_str(&content).map_err(|e| CatadorError::FormatError {
            message: format!("failed to parse model '{}': {e}", path.display()),
        })?;
    model.validate(FEATURE_COUNT)?;
    Ok(model)
}

/// Strictly load and validate the scaler artifact
///
/// # Errors
///
/// Same taxonomy as [`load_model`].
pub fn load_scaler(path: &Path) -> Result<StandardScaler> {
    let content = std::fs::read_to_string(path).map_err(|e| CatadorError::IoError {
        message: format!("failed to read scaler '{}': {e}", path.display()),
    })?;
    let scaler: StandardScaler =
        serde_json::from_str(&content).map_err(|e| CatadorError::FormatError {
            message: format!("failed to parse scaler '{}': {e}", path.display()),
        })?;
    scaler.validate(FEATURE_COUNT)?;
    Ok(scaler)
}
