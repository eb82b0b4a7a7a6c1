use eframe::egui::{
    self, Align2, Color32, CornerRadius, FontId, Frame, Margin, RichText, Stroke, StrokeKind, Ui,
};

use super::style;
use super::view_model::{self, ChartRow, MetricCard};
use crate::health::HealthStatus;
use crate::sensor::{Bound, ProductGrade, SensorBounds, SensorReading};

const HEALTH_BAR_HEIGHT: f32 = 45.0;
const CHART_ROW_HEIGHT: f32 = 26.0;
const CHART_LABEL_WIDTH: f32 = 70.0;

/// Grade selector and the five sliders. Returns true when any input changed.
pub(super) fn render_inputs(ui: &mut Ui, reading: &mut SensorReading) -> bool {
    let mut changed = false;
    ui.heading("Sensor Input Simulation");
    ui.add_space(12.0);

    ui.label("Product Grade");
    egui::ComboBox::from_id_salt("product_grade")
        .selected_text(reading.grade.label())
        .show_ui(ui, |ui| {
            for grade in ProductGrade::ALL {
                changed |= ui
                    .selectable_value(&mut reading.grade, grade, grade.label())
                    .changed();
            }
        });
    ui.add_space(8.0);

    changed |= slider(ui, SensorBounds::AIR_TEMP_K, &mut reading.air_temp_k);
    changed |= slider(ui, SensorBounds::PROCESS_TEMP_K, &mut reading.process_temp_k);
    changed |= slider(
        ui,
        SensorBounds::ROTATIONAL_SPEED_RPM,
        &mut reading.rotational_speed_rpm,
    );
    changed |= slider(ui, SensorBounds::TORQUE_NM, &mut reading.torque_nm);
    changed |= slider(ui, SensorBounds::TOOL_WEAR_MIN, &mut reading.tool_wear_min);
    changed
}

fn slider(ui: &mut Ui, bound: Bound, value: &mut f64) -> bool {
    ui.label(bound.label);
    let response = ui.add(
        egui::Slider::new(value, bound.range())
            .step_by(1.0)
            .fixed_decimals(0)
            .clamping(egui::SliderClamping::Always),
    );
    ui.add_space(6.0);
    response.changed()
}

pub(super) fn render_metric_cards(ui: &mut Ui, cards: &[MetricCard; 4]) {
    let palette = style::palette();
    ui.columns(cards.len(), |columns| {
        for (column, card) in columns.iter_mut().zip(cards.iter()) {
            Frame::new()
                .fill(palette.card_fill)
                .corner_radius(CornerRadius::same(14))
                .inner_margin(Margin::same(20))
                .stroke(Stroke::new(1.0, palette.card_accent))
                .show(column, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.label(RichText::new(card.title).color(palette.card_text).size(14.0));
                    ui.label(
                        RichText::new(&card.value)
                            .color(palette.card_text)
                            .size(26.0)
                            .strong(),
                    );
                });
        }
    });
}

pub(super) fn render_health_bar(ui: &mut Ui, score: u8, status: HealthStatus, min_width: f32) {
    let palette = style::palette();
    ui.label(RichText::new("Machine Vitality").size(20.0).strong());
    ui.add_space(6.0);
    let desired = egui::vec2(ui.available_width(), HEALTH_BAR_HEIGHT);
    let (rect, _) = ui.allocate_exact_size(desired, egui::Sense::hover());
    let layout = view_model::health_bar(score, status, rect.width(), min_width);
    let radius = CornerRadius::same(22);

    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, radius, palette.track);
    let fill = egui::Rect::from_min_size(rect.min, egui::vec2(layout.fill_width, rect.height()));
    painter.rect_filled(fill, radius, style::status_color(layout.status));
    painter.text(
        fill.center(),
        Align2::CENTER_CENTER,
        &layout.label,
        FontId::proportional(16.0),
        Color32::WHITE,
    );
}

pub(super) fn render_importance_chart(ui: &mut Ui, rows: &[ChartRow]) {
    let palette = style::palette();
    ui.label(RichText::new("Global Feature Importance").size(20.0).strong());
    ui.add_space(6.0);
    let height = CHART_ROW_HEIGHT * rows.len() as f32;
    let desired = egui::vec2(ui.available_width(), height);
    let (rect, _) = ui.allocate_exact_size(desired, egui::Sense::hover());
    let painter = ui.painter_at(rect);
    painter.rect_stroke(
        rect,
        0.0,
        Stroke::new(1.0, palette.panel_outline),
        StrokeKind::Inside,
    );

    let bar_span = (rect.width() - CHART_LABEL_WIDTH - 60.0).max(0.0);
    for (idx, row) in rows.iter().enumerate() {
        let bottom = rect.bottom() - CHART_ROW_HEIGHT * idx as f32;
        let top = bottom - CHART_ROW_HEIGHT;
        let center_y = (top + bottom) / 2.0;
        painter.text(
            egui::pos2(rect.left() + CHART_LABEL_WIDTH - 6.0, center_y),
            Align2::RIGHT_CENTER,
            row.label,
            FontId::proportional(13.0),
            palette.text_primary,
        );
        let bar_left = rect.left() + CHART_LABEL_WIDTH;
        let bar = egui::Rect::from_min_max(
            egui::pos2(bar_left, top + 4.0),
            egui::pos2(bar_left + bar_span * row.length_fraction, bottom - 4.0),
        );
        painter.rect_filled(bar, 0.0, palette.chart_bar);
        painter.text(
            egui::pos2(bar.right() + 6.0, center_y),
            Align2::LEFT_CENTER,
            format!("{:.3}", row.weight),
            FontId::monospace(12.0),
            palette.text_muted,
        );
    }
}
