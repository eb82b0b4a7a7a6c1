//! Pre-trained artifacts consumed by the dashboard.
//!
//! The classifier and encoder are produced offline and loaded once at startup;
//! nothing here trains or updates them.

pub mod encoder;
pub mod gbdt;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::features::FeatureVector;
use crate::sensor::ProductGrade;

pub use encoder::{EncodeError, LabelEncoder};
pub use gbdt::{GbdtModel, RegressionTree, TreeNode, sigmoid};

/// Pseudo-path reported for artifacts embedded in the binary.
pub const BUNDLED_ARTIFACT_PATH: &str = "<bundled>";

/// Binary probabilistic classifier over the fixed feature schema.
pub trait Classifier {
    /// Probability of the positive (failure) class, in `[0, 1]`.
    fn predict_probability(&self, features: &FeatureVector) -> f64;

    /// Non-negative weight per feature, in schema order.
    fn feature_importances(&self) -> &[f64];
}

/// Maps a product grade onto the integer code the classifier was trained with.
pub trait CategoryEncoder {
    /// Integer code for `grade`.
    fn encode(&self, grade: ProductGrade) -> Result<u32, EncodeError>;
}

/// Errors raised while loading a model or encoder artifact.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// Failed to read the artifact file.
    #[error("Failed to read artifact {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The artifact is not valid JSON for its type.
    #[error("Invalid artifact JSON at {path}: {source}")]
    ParseJson {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// The artifact parsed but violates a structural invariant.
    #[error("Artifact {path} rejected: {reason}")]
    Invalid { path: PathBuf, reason: String },
}

pub(crate) fn read_artifact(path: &Path) -> Result<Vec<u8>, ArtifactError> {
    std::fs::read(path).map_err(|source| ArtifactError::Read {
        path: path.to_path_buf(),
        source,
    })
}
