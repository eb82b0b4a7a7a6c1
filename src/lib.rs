//! Predictive-maintenance dashboard: sensor readings in, failure risk out.
/// Application directory resolution.
pub mod app_dirs;
/// Persisted TOML settings.
pub mod config;
/// egui presentation layer.
pub mod dashboard;
/// Feature schema and derivation.
pub mod features;
/// Status thresholds and prediction results.
pub mod health;
/// Tracing subscriber setup.
pub mod logging;
/// Pre-trained classifier and encoder artifacts.
pub mod ml;
/// Encode, derive, predict, classify.
pub mod pipeline;
/// Sensor readings and input bounds.
pub mod sensor;
