//! Display strings and geometry derived from an assessment.
//!
//! Kept free of egui so the formatting rules are testable without a window.

use crate::health::HealthStatus;
use crate::pipeline::{Assessment, ImportanceBar};

/// One labelled metric card.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricCard {
    pub title: &'static str,
    pub value: String,
}

/// The four cards shown above the health bar, left to right.
pub fn metric_cards(assessment: &Assessment) -> [MetricCard; 4] {
    let prediction = &assessment.prediction;
    [
        MetricCard {
            title: "Failure Risk",
            value: format_risk(prediction.probability),
        },
        MetricCard {
            title: "Health Score",
            value: format!("{}/100", prediction.health_score),
        },
        MetricCard {
            title: "System Status",
            value: prediction.status.label().to_string(),
        },
        MetricCard {
            title: "Energy Draw",
            value: format_energy(assessment.energy_draw_kw()),
        },
    ]
}

/// Probability as a percentage with one decimal, e.g. `12.3%`.
pub fn format_risk(probability: f64) -> String {
    format!("{:.1}%", probability * 100.0)
}

pub fn format_energy(kw: f64) -> String {
    format!("{kw:.1} kW")
}

/// Geometry and text of the health bar fill.
#[derive(Debug, Clone, PartialEq)]
pub struct HealthBarLayout {
    /// Fill width in points, never wider than the track.
    pub fill_width: f32,
    pub label: String,
    pub status: HealthStatus,
}

/// Fill proportional to `health_score`, raised to `min_width` so the label stays visible.
pub fn health_bar(
    health_score: u8,
    status: HealthStatus,
    track_width: f32,
    min_width: f32,
) -> HealthBarLayout {
    let track_width = track_width.max(0.0);
    let proportional = track_width * f32::from(health_score.min(100)) / 100.0;
    HealthBarLayout {
        fill_width: proportional.max(min_width).min(track_width),
        label: format!("{health_score}% Healthy"),
        status,
    }
}

/// One bar of the importance chart, with its length relative to the largest weight.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRow {
    pub label: &'static str,
    pub weight: f64,
    /// `weight / max_weight`, or 0 when every weight is 0.
    pub length_fraction: f32,
}

/// Rows in the order they are stacked, bottom to top.
pub fn chart_rows(bars: &[ImportanceBar]) -> Vec<ChartRow> {
    let max = bars.iter().map(|bar| bar.weight).fold(0.0f64, f64::max);
    bars.iter()
        .map(|bar| ChartRow {
            label: bar.label,
            weight: bar.weight,
            length_fraction: if max > 0.0 {
                (bar.weight / max) as f32
            } else {
                0.0
            },
        })
        .collect()
}
