//! Fitted feature-scaling transform
//!
//! The scaler artifact holds the per-feature mean and scale fitted during
//! offline training. It is loaded once at startup and applied read-only to
//! every request; the transform is a deterministic, stateless function of
//! its input given those parameters.

use serde::{Deserialize, Serialize};

use crate::error::{CatadorError, Result};

/// Standardizing transform with fitted per-feature parameters
///
/// Maps a raw feature vector to `(x - mean) / scale` elementwise. The
/// parameter vectors must match the model's feature count; this is checked
/// once at load time so the per-request path never re-validates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Per-feature mean subtracted before scaling
    pub mean: Vec<f64>,
    /// Per-feature divisor (standard deviation as fitted)
    pub scale: Vec<f64>,
}

impl StandardScaler {
    /// Identity scaler of the given dimension (mean 0, scale 1)
    #[must_use]
    pub fn identity(dim: usize) -> Self {
        Self {
            mean: vec![0.0; dim],
            scale: vec![1.0; dim],
        }
    }

    /// Check fitted parameters against the expected feature count
    ///
    /// # Errors
    ///
    /// Returns `InvalidShape` when either vector has the wrong length or a
    /// scale entry is zero or non-finite.
    pub fn validate(&self, expected_features: usize) -> Result<()> {
        if self.mean.len() != expected_features {
            return Err(CatadorError::InvalidShape {
                reason: format!(
                    "scaler mean has {} entries, expected {expected_features}",
                    self.mean.len()
                ),
            });
        }
        if self.scale.len() != expected_features {
            return Err(CatadorError::InvalidShape {
                reason: format!(
                    "scaler scale has {} entries, expected {expected_features}",
                    self.scale.len()
                ),
            });
        }
        for (i, s) in self.scale.iter().enumerate() {
            if !s.is_finite() || *s == 0.0 {
                return Err(CatadorError::InvalidShape {
                    reason: format!("scaler scale[{i}] is {s}, must be finite and non-zero"),
                });
            }
        }
        Ok(())
    }

    /// Apply the fitted transform to a raw feature vector
    ///
    /// The input length must match the fitted dimension; callers go through
    /// the validated load path so this holds by construction.
    #[must_use]
    pub fn transform(&self, features: &[f64]) -> Vec<f64> {
        features
            .iter()
            .zip(self.mean.iter())
            .zip(self.scale.iter())
            .map(|((x, m), s)| (x - m) / s)
            .collect()
    }
}
