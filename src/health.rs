//! Failure probability to health status mapping.
//!
//! Every threshold comparison used by the dashboard lives here so the metric
//! card, the bar color and the CLI output can never disagree.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Probability above which the machine is considered critical.
pub const CRITICAL_THRESHOLD: f64 = 0.5;
/// Probability above which the machine needs attention.
pub const WARNING_THRESHOLD: f64 = 0.1;

/// Discrete machine health state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthStatus {
    /// `p <= 0.1`
    Optimal,
    /// `0.1 < p <= 0.5`
    Warning,
    /// `p > 0.5`
    Critical,
}

impl HealthStatus {
    /// Classify a failure probability.
    pub fn from_probability(probability: f64) -> Self {
        let p = sanitize_probability(probability);
        if p > CRITICAL_THRESHOLD {
            HealthStatus::Critical
        } else if p > WARNING_THRESHOLD {
            HealthStatus::Warning
        } else {
            HealthStatus::Optimal
        }
    }

    /// Uppercase label shown on the status card.
    pub fn label(self) -> &'static str {
        match self {
            HealthStatus::Optimal => "OPTIMAL",
            HealthStatus::Warning => "WARNING",
            HealthStatus::Critical => "CRITICAL",
        }
    }

    /// Display color as `(r, g, b)`: green, amber or red.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            HealthStatus::Optimal => (0x2e, 0xcc, 0x71),
            HealthStatus::Warning => (0xf3, 0x9c, 0x12),
            HealthStatus::Critical => (0xe7, 0x4c, 0x3c),
        }
    }

    /// Display color as a `#rrggbb` string.
    pub fn hex(self) -> String {
        let (r, g, b) = self.rgb();
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Probability of failure in `[0, 1]`.
    pub probability: f64,
    /// `round((1 - p) * 100)`, in `0..=100`.
    pub health_score: u8,
    /// Status derived from `probability`.
    pub status: HealthStatus,
}

impl PredictionResult {
    /// Derive score and status from a classifier probability.
    pub fn from_probability(probability: f64) -> Self {
        if !(0.0..=1.0).contains(&probability) {
            tracing::warn!("Classifier returned out-of-range probability {probability}; clamping");
        }
        let probability = sanitize_probability(probability);
        Self {
            probability,
            health_score: health_score(probability),
            status: HealthStatus::from_probability(probability),
        }
    }
}

/// `round((1 - p) * 100)` clamped to `0..=100`.
pub fn health_score(probability: f64) -> u8 {
    let p = sanitize_probability(probability);
    ((1.0 - p) * 100.0).round().clamp(0.0, 100.0) as u8
}

/// NaN counts as certain failure.
fn sanitize_probability(probability: f64) -> f64 {
    if probability.is_nan() {
        1.0
    } else {
        probability.clamp(0.0, 1.0)
    }
}
