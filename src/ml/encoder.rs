//! Categorical label encoder for the product grade column.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::ml::{ArtifactError, BUNDLED_ARTIFACT_PATH, CategoryEncoder, read_artifact};
use crate::sensor::ProductGrade;

const BUNDLED_ENCODER_JSON: &str = include_str!("../../assets/model/label_encoder.json");

/// Label outside the vocabulary the encoder was fit on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The label has no code.
    #[error("Label {0:?} is not in the encoder vocabulary")]
    UnknownLabel(String),
}

/// Fitted label encoder: a label's code is its index in `classes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEncoder {
    /// Encoder format version.
    pub encoder_version: i64,
    /// Vocabulary in code order.
    pub classes: Vec<String>,
}

impl LabelEncoder {
    /// Validate that labels are unique and cover every product grade.
    pub fn validate(&self) -> Result<(), String> {
        for (idx, class) in self.classes.iter().enumerate() {
            if self.classes[..idx].contains(class) {
                return Err(format!("Duplicate class label {class:?}"));
            }
        }
        for grade in ProductGrade::ALL {
            if !self.classes.iter().any(|c| c == grade.label()) {
                return Err(format!("Missing class label {:?}", grade.label()));
            }
        }
        Ok(())
    }

    /// Load an encoder from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self, ArtifactError> {
        let bytes = read_artifact(path)?;
        Self::from_json_slice(&bytes, path)
    }

    /// Encoder embedded in the binary.
    pub fn bundled() -> Result<Self, ArtifactError> {
        Self::from_json_slice(
            BUNDLED_ENCODER_JSON.as_bytes(),
            Path::new(BUNDLED_ARTIFACT_PATH),
        )
    }

    fn from_json_slice(bytes: &[u8], path: &Path) -> Result<Self, ArtifactError> {
        let encoder: Self =
            serde_json::from_slice(bytes).map_err(|source| ArtifactError::ParseJson {
                path: path.to_path_buf(),
                source,
            })?;
        encoder.validate().map_err(|reason| ArtifactError::Invalid {
            path: path.to_path_buf(),
            reason,
        })?;
        Ok(encoder)
    }

    /// Code for an arbitrary label.
    pub fn transform(&self, label: &str) -> Result<u32, EncodeError> {
        self.classes
            .iter()
            .position(|class| class == label)
            .and_then(|idx| u32::try_from(idx).ok())
            .ok_or_else(|| EncodeError::UnknownLabel(label.to_string()))
    }
}

impl CategoryEncoder for LabelEncoder {
    fn encode(&self, grade: ProductGrade) -> Result<u32, EncodeError> {
        self.transform(grade.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoder(classes: &[&str]) -> LabelEncoder {
        LabelEncoder {
            encoder_version: 1,
            classes: classes.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn codes_follow_class_order() {
        let enc = encoder(&["H", "L", "M"]);
        assert_eq!(enc.encode(ProductGrade::H).unwrap(), 0);
        assert_eq!(enc.encode(ProductGrade::L).unwrap(), 1);
        assert_eq!(enc.encode(ProductGrade::M).unwrap(), 2);
    }

    #[test]
    fn unknown_label_is_an_error() {
        let enc = encoder(&["H", "L", "M"]);
        assert_eq!(
            enc.transform("X"),
            Err(EncodeError::UnknownLabel("X".to_string()))
        );
    }

    #[test]
    fn validate_requires_every_grade_once() {
        assert!(encoder(&["H", "L", "M"]).validate().is_ok());
        assert!(encoder(&["H", "L"]).validate().is_err());
        assert!(encoder(&["H", "L", "M", "L"]).validate().is_err());
    }

    #[test]
    fn bundled_encoder_uses_sorted_vocabulary() {
        let enc = LabelEncoder::bundled().unwrap();
        assert_eq!(enc.classes, ["H", "L", "M"]);
    }

    #[test]
    fn load_json_rejects_incomplete_vocabulary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("label_encoder.json");
        std::fs::write(&path, r#"{"encoder_version":1,"classes":["L","M"]}"#).unwrap();
        let err = LabelEncoder::load_json(&path).unwrap_err();
        assert!(matches!(err, ArtifactError::Invalid { .. }), "{err}");
    }
}
