//! Encode, derive, predict and classify one sensor reading.
//!
//! [`Artifacts`] is built once at startup and then only borrowed: each
//! evaluation reads it and allocates nothing that outlives the call.

use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use crate::config::ArtifactSettings;
use crate::features::{self, Feature, FeatureVector};
use crate::health::PredictionResult;
use crate::ml::{
    ArtifactError, CategoryEncoder, Classifier, EncodeError, GbdtModel, LabelEncoder,
};
use crate::sensor::SensorReading;

/// Errors raised while evaluating a reading.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// The encoder has no code for the reading's grade.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Loaded classifier and encoder, read-only after construction.
#[derive(Debug, Clone)]
pub struct Artifacts<C = GbdtModel, E = LabelEncoder> {
    classifier: C,
    encoder: E,
}

impl Artifacts {
    /// Artifacts compiled into the binary.
    pub fn bundled() -> Result<Self, ArtifactError> {
        Self::load(None, None)
    }

    /// Load artifacts from the configured paths.
    pub fn from_settings(settings: &ArtifactSettings) -> Result<Self, ArtifactError> {
        Self::load(
            settings.model_path.as_deref(),
            settings.encoder_path.as_deref(),
        )
    }

    /// Load each artifact from `path`, or from the bundled copy when `None`.
    pub fn load(
        model_path: Option<&Path>,
        encoder_path: Option<&Path>,
    ) -> Result<Self, ArtifactError> {
        let classifier = match model_path {
            Some(path) => GbdtModel::load_json(path)?,
            None => GbdtModel::bundled()?,
        };
        tracing::info!(
            source = %describe_source(model_path),
            trees = classifier.trees.len(),
            "Loaded classifier"
        );
        let encoder = match encoder_path {
            Some(path) => LabelEncoder::load_json(path)?,
            None => LabelEncoder::bundled()?,
        };
        tracing::info!(
            source = %describe_source(encoder_path),
            classes = ?encoder.classes,
            "Loaded label encoder"
        );
        Ok(Self::new(classifier, encoder))
    }
}

fn describe_source(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| crate::ml::BUNDLED_ARTIFACT_PATH.to_string())
}

impl<C: Classifier, E: CategoryEncoder> Artifacts<C, E> {
    /// Pair a classifier with the encoder it was trained alongside.
    pub fn new(classifier: C, encoder: E) -> Self {
        Self {
            classifier,
            encoder,
        }
    }

    /// Loaded classifier.
    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Loaded encoder.
    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    /// Run the full pipeline for one reading.
    pub fn evaluate(&self, reading: &SensorReading) -> Result<Assessment, PipelineError> {
        let encoded = self.encoder.encode(reading.grade)?;
        let features = features::derive(encoded, reading);
        let probability = self.classifier.predict_probability(&features);
        let prediction = PredictionResult::from_probability(probability);
        tracing::debug!(
            grade = %reading.grade,
            probability,
            status = %prediction.status,
            "Evaluated reading"
        );
        Ok(Assessment {
            reading: *reading,
            features,
            prediction,
        })
    }

    /// Importance weights paired with their labels, ascending by weight.
    pub fn importance_chart(&self) -> Vec<ImportanceBar> {
        importance_chart(self.classifier.feature_importances())
    }
}

/// Everything the dashboard shows for one reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Assessment {
    /// Input that produced this assessment.
    pub reading: SensorReading,
    /// Model input derived from the reading.
    pub features: FeatureVector,
    /// Probability, score and status.
    pub prediction: PredictionResult,
}

impl Assessment {
    /// Mechanical power column scaled by 1/1000 for the energy card.
    pub fn energy_draw_kw(&self) -> f64 {
        self.features.get(Feature::Power) / 1000.0
    }
}

/// One bar of the importance chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportanceBar {
    /// Schema column.
    #[serde(skip)]
    pub feature: Feature,
    /// Chart label.
    pub label: &'static str,
    /// Importance weight.
    pub weight: f64,
}

/// Label `weights` by schema position and sort ascending; ties keep schema order.
pub fn importance_chart(weights: &[f64]) -> Vec<ImportanceBar> {
    let mut bars: Vec<ImportanceBar> = Feature::ALL
        .iter()
        .zip(weights.iter())
        .map(|(feature, weight)| ImportanceBar {
            feature: *feature,
            label: feature.display_name(),
            weight: *weight,
        })
        .collect();
    bars.sort_by(|a, b| a.weight.total_cmp(&b.weight));
    bars
}
