use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::features::{FEATURE_COUNT, Feature, FeatureVector};
use crate::ml::{ArtifactError, BUNDLED_ARTIFACT_PATH, Classifier, read_artifact};

const BUNDLED_MODEL_JSON: &str = include_str!("../../../assets/model/champion_model.json");

/// Node of a regression tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeNode {
    /// Route to `left` when `features[feature] <= threshold`, else to `right`.
    Split {
        /// Feature index used for the split.
        feature: usize,
        /// Threshold in feature units.
        threshold: f64,
        /// Node index taken for `feature <= threshold`.
        left: usize,
        /// Node index taken for `feature > threshold`.
        right: usize,
    },
    /// Terminal node carrying the tree output.
    Leaf {
        /// Raw contribution added to the logit.
        value: f64,
    },
}

/// Regression tree stored as a flat node list rooted at index 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    /// Children always point forward, so walks terminate.
    pub nodes: Vec<TreeNode>,
}

impl RegressionTree {
    /// Walk the tree for a feature vector and return the leaf value.
    pub fn predict(&self, features: &[f64]) -> f64 {
        let mut idx = 0usize;
        for _ in 0..self.nodes.len() {
            match self.nodes.get(idx) {
                Some(TreeNode::Leaf { value }) => return *value,
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let value = features.get(*feature).copied().unwrap_or(0.0);
                    idx = if value <= *threshold { *left } else { *right };
                }
                None => return 0.0,
            }
        }
        0.0
    }

    fn validate(&self, tree_idx: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err(format!("Tree {tree_idx} has no nodes"));
        }
        for (node_idx, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(format!("Tree {tree_idx} node {node_idx} has a non-finite leaf"));
                    }
                }
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= FEATURE_COUNT {
                        return Err(format!(
                            "Tree {tree_idx} node {node_idx} splits on feature {feature} (expected < {FEATURE_COUNT})"
                        ));
                    }
                    if !threshold.is_finite() {
                        return Err(format!(
                            "Tree {tree_idx} node {node_idx} has a non-finite threshold"
                        ));
                    }
                    for child in [*left, *right] {
                        if child <= node_idx || child >= self.nodes.len() {
                            return Err(format!(
                                "Tree {tree_idx} node {node_idx} points at invalid child {child}"
                            ));
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

/// Gradient-boosted tree model for binary classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GbdtModel {
    /// Model format version.
    pub model_version: i64,
    /// Column keys in the order the model was trained on.
    pub feature_names: Vec<String>,
    /// Learning rate applied to each tree output.
    pub learning_rate: f64,
    /// Initial raw logit before boosting rounds.
    pub init_raw: f64,
    /// One tree per boosting round.
    pub trees: Vec<RegressionTree>,
    /// Exported importance weights; derived from split counts when empty.
    #[serde(default)]
    pub feature_importances: Vec<f64>,
}

impl GbdtModel {
    /// Validate structural invariants of the model.
    pub fn validate(&self) -> Result<(), String> {
        let expected = Feature::keys();
        if self.feature_names.len() != FEATURE_COUNT
            || self
                .feature_names
                .iter()
                .zip(expected.iter())
                .any(|(name, key)| name != key)
        {
            return Err(format!(
                "feature_names {:?} do not match the expected column order {:?}",
                self.feature_names, expected
            ));
        }
        if !self.learning_rate.is_finite() || !self.init_raw.is_finite() {
            return Err("learning_rate and init_raw must be finite".to_string());
        }
        if self.trees.is_empty() {
            return Err("Model contains no trees".to_string());
        }
        for (tree_idx, tree) in self.trees.iter().enumerate() {
            tree.validate(tree_idx)?;
        }
        if !self.feature_importances.is_empty() {
            if self.feature_importances.len() != FEATURE_COUNT {
                return Err(format!(
                    "feature_importances has {} entries but expected {FEATURE_COUNT}",
                    self.feature_importances.len()
                ));
            }
            if self
                .feature_importances
                .iter()
                .any(|w| !w.is_finite() || *w < 0.0)
            {
                return Err("feature_importances must be finite and non-negative".to_string());
            }
        }
        Ok(())
    }

    /// Load a model from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self, ArtifactError> {
        let bytes = read_artifact(path)?;
        Self::from_json_slice(&bytes, path)
    }

    /// Model embedded in the binary.
    pub fn bundled() -> Result<Self, ArtifactError> {
        Self::from_json_slice(
            BUNDLED_MODEL_JSON.as_bytes(),
            Path::new(BUNDLED_ARTIFACT_PATH),
        )
    }

    fn from_json_slice(bytes: &[u8], path: &Path) -> Result<Self, ArtifactError> {
        let mut model: Self =
            serde_json::from_slice(bytes).map_err(|source| ArtifactError::ParseJson {
                path: path.to_path_buf(),
                source,
            })?;
        model.validate().map_err(|reason| ArtifactError::Invalid {
            path: path.to_path_buf(),
            reason,
        })?;
        if model.feature_importances.is_empty() {
            model.feature_importances = model.split_count_importances();
        }
        Ok(model)
    }

    /// Predict the raw logit for a feature vector.
    pub fn predict_raw(&self, features: &[f64]) -> f64 {
        let mut raw = self.init_raw;
        for tree in &self.trees {
            raw += self.learning_rate * tree.predict(features);
        }
        raw
    }

    /// Share of split nodes using each feature; all zeros for a model of leaves.
    pub fn split_count_importances(&self) -> Vec<f64> {
        let mut counts = vec![0.0f64; FEATURE_COUNT];
        for tree in &self.trees {
            for node in &tree.nodes {
                if let TreeNode::Split { feature, .. } = node
                    && let Some(count) = counts.get_mut(*feature)
                {
                    *count += 1.0;
                }
            }
        }
        let total: f64 = counts.iter().sum();
        if total > 0.0 {
            for v in &mut counts {
                *v /= total;
            }
        }
        counts
    }
}

impl Classifier for GbdtModel {
    fn predict_probability(&self, features: &FeatureVector) -> f64 {
        sigmoid(self.predict_raw(features.as_slice()))
    }

    fn feature_importances(&self) -> &[f64] {
        &self.feature_importances
    }
}

/// Numerically-stable logistic function.
pub fn sigmoid(raw: f64) -> f64 {
    if raw >= 0.0 {
        1.0 / (1.0 + (-raw).exp())
    } else {
        let e = raw.exp();
        e / (1.0 + e)
    }
}
