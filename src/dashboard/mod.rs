//! egui dashboard: sensor inputs on the left, assessment on the right.

mod panels;
pub mod style;
pub mod view_model;

use eframe::egui::{self, Frame, Margin, RichText};

use crate::config::UiSettings;
use crate::health::HealthStatus;
use crate::pipeline::{Artifacts, Assessment, PipelineError};
use crate::sensor::SensorReading;

/// Smallest window size that keeps the four metric cards legible.
pub const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::vec2(960.0, 640.0);

/// Window title.
pub const APP_TITLE: &str = "PrediFix AI";

/// Dashboard state: artifacts, the current widget values and the last result.
pub struct DashboardApp {
    artifacts: Artifacts,
    settings: UiSettings,
    reading: SensorReading,
    latest: Option<Result<Assessment, PipelineError>>,
    chart: Vec<view_model::ChartRow>,
    last_status: Option<HealthStatus>,
    visuals_set: bool,
}

impl DashboardApp {
    /// Build the dashboard around artifacts loaded at startup.
    pub fn new(artifacts: Artifacts, settings: UiSettings) -> Self {
        let chart = view_model::chart_rows(&artifacts.importance_chart());
        let mut app = Self {
            artifacts,
            settings,
            reading: SensorReading::default(),
            latest: None,
            chart,
            last_status: None,
            visuals_set: false,
        };
        app.refresh();
        app
    }

    /// Current input values.
    pub fn reading(&self) -> &SensorReading {
        &self.reading
    }

    /// Result for the current input values.
    pub fn latest(&self) -> Option<&Result<Assessment, PipelineError>> {
        self.latest.as_ref()
    }

    /// Replace the inputs and re-run the pipeline.
    pub fn set_reading(&mut self, reading: SensorReading) {
        self.reading = reading.clamped();
        self.refresh();
    }

    fn refresh(&mut self) {
        let result = self.artifacts.evaluate(&self.reading);
        match &result {
            Ok(assessment) => {
                let status = assessment.prediction.status;
                if self.last_status != Some(status) {
                    tracing::info!(
                        status = %status,
                        probability = assessment.prediction.probability,
                        "Machine status changed"
                    );
                    self.last_status = Some(status);
                }
            }
            Err(err) => tracing::error!("Evaluation failed: {err}"),
        }
        self.latest = Some(result);
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn render_sidebar(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::SidePanel::left("sensor_inputs")
            .resizable(false)
            .default_width(280.0)
            .frame(
                Frame::new()
                    .fill(palette.bg_sidebar)
                    .inner_margin(Margin::same(16)),
            )
            .show(ctx, |ui| {
                let mut reading = self.reading;
                if panels::render_inputs(ui, &mut reading) {
                    self.set_reading(reading);
                }
            });
    }

    fn render_main(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::CentralPanel::default()
            .frame(
                Frame::new()
                    .fill(palette.bg_app)
                    .inner_margin(Margin::same(24)),
            )
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .id_salt("dashboard_scroll")
                    .show(ui, |ui| {
                        ui.heading(
                            RichText::new("Industrial Fault Detection Using Machine Learning")
                                .size(30.0)
                                .strong(),
                        );
                        ui.label(
                            "Real-time predictive maintenance powered by Gradient Boosting Machines.",
                        );
                        ui.add_space(16.0);
                        match &self.latest {
                            Some(Ok(assessment)) => {
                                panels::render_metric_cards(
                                    ui,
                                    &view_model::metric_cards(assessment),
                                );
                                ui.add_space(20.0);
                                panels::render_health_bar(
                                    ui,
                                    assessment.prediction.health_score,
                                    assessment.prediction.status,
                                    self.settings.health_bar_min_width,
                                );
                            }
                            Some(Err(err)) => {
                                ui.colored_label(
                                    style::status_color(HealthStatus::Critical),
                                    format!("Evaluation failed: {err}"),
                                );
                            }
                            None => {}
                        }
                        ui.add_space(16.0);
                        ui.separator();
                        ui.add_space(16.0);
                        panels::render_importance_chart(ui, &self.chart);
                        ui.add_space(12.0);
                        ui.label(RichText::new("Developed with ☕").color(palette.text_muted));
                    });
            });
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.render_sidebar(ctx);
        self.render_main(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::ProductGrade;

    fn app() -> DashboardApp {
        DashboardApp::new(Artifacts::bundled().unwrap(), UiSettings::default())
    }

    #[test]
    fn starts_with_default_reading_evaluated() {
        let app = app();
        assert_eq!(*app.reading(), SensorReading::default());
        let assessment = app.latest().unwrap().as_ref().unwrap();
        assert_eq!(assessment.reading, SensorReading::default());
        assert_eq!(app.chart.len(), 8);
    }

    #[test]
    fn set_reading_clamps_and_reevaluates() {
        let mut app = app();
        app.set_reading(SensorReading {
            grade: ProductGrade::H,
            torque_nm: 500.0,
            ..SensorReading::default()
        });
        assert_eq!(app.reading().torque_nm, 80.0);
        let assessment = app.latest().unwrap().as_ref().unwrap();
        assert_eq!(assessment.reading.grade, ProductGrade::H);
        assert_eq!(assessment.features.as_slice()[4], 80.0);
    }
}
