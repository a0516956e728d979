//! Gradient-boosted regression tree ensemble
//!
//! The prediction model artifact is a fitted tree ensemble exported by the
//! offline training pipeline: a base score plus a list of regression trees,
//! each stored as a flat node array. Inference sums the leaf value reached
//! in every tree.
//!
//! The ensemble is validated once at load time (index bounds, feature
//! bounds, acyclicity), so the per-request traversal carries no checks.

use serde::{Deserialize, Serialize};

use crate::error::{CatadorError, Result};

/// One node of a regression tree
///
/// Serialized untagged: split nodes carry `feature`/`threshold`/`left`/
/// `right`, leaves carry only `value`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    /// Interior decision node
    Split {
        /// Index into the canonical feature vector
        feature: usize,
        /// Decision boundary in scaled feature units
        threshold: f64,
        /// Child index taken when `x[feature] < threshold`
        left: usize,
        /// Child index taken otherwise
        right: usize,
    },
    /// Terminal node contributing its value to the ensemble sum
    Leaf {
        /// Leaf weight
        value: f64,
    },
}

/// A single regression tree stored as a flat node array rooted at index 0
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionTree {
    /// Tree nodes; node 0 is the root
    pub nodes: Vec<TreeNode>,
}

impl RegressionTree {
    /// Check structural soundness: in-bounds children and features, and no
    /// node reachable twice from the root
    fn validate(&self, expected_features: usize) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(CatadorError::InvalidShape {
                reason: "tree has no nodes".to_string(),
            });
        }

        let mut visited = vec![false; self.nodes.len()];
        let mut stack = vec![0_usize];
        while let Some(idx) = stack.pop() {
            if visited[idx] {
                return Err(CatadorError::InvalidShape {
                    reason: format!("node {idx} reachable twice, tree is not acyclic"),
                });
            }
            visited[idx] = true;

            if let TreeNode::Split {
                feature,
                left,
                right,
                ..
            } = &self.nodes[idx]
            {
                if *feature >= expected_features {
                    return Err(CatadorError::InvalidShape {
                        reason: format!(
                            "node {idx} splits on feature {feature}, model has {expected_features}"
                        ),
                    });
                }
                for child in [*left, *right] {
                    if child >= self.nodes.len() {
                        return Err(CatadorError::InvalidShape {
                            reason: format!("node {idx} references child {child} out of bounds"),
                        });
                    }
                }
                stack.push(*left);
                stack.push(*right);
            }
        }
        Ok(())
    }

    /// Walk from the root to a leaf and return its value
    fn score(&self, features: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                TreeNode::Leaf { value } => return *value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if features[*feature] < *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }
}

/// Fitted gradient-boosted tree regressor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GbtRegressor {
    /// Global bias added to the tree sum
    pub base_score: f64,
    /// Boosted trees, all contributing additively
    pub trees: Vec<RegressionTree>,
}

impl GbtRegressor {
    /// Check the whole ensemble against the expected feature count
    ///
    /// # Errors
    ///
    /// Returns `InvalidShape` for an empty ensemble or any structurally
    /// unsound tree.
    pub fn validate(&self, expected_features: usize) -> Result<()> {
        if self.trees.is_empty() {
            return Err(CatadorError::InvalidShape {
                reason: "ensemble has no trees".to_string(),
            });
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(expected_features).map_err(|e| match e {
                CatadorError::InvalidShape { reason } => CatadorError::InvalidShape {
                    reason: format!("tree {i}: {reason}"),
                },
                other => other,
            })?;
        }
        Ok(())
    }

    /// Predict a quality score from a scaled feature vector
    ///
    /// Deterministic: the same input against the same fitted trees always
    /// produces the same output.
    #[must_use]
    pub fn predict(&self, features: &[f64]) -> f64 {
        self.base_score + self.trees.iter().map(|t| t.score(features)).sum::<f64>()
    }
}
