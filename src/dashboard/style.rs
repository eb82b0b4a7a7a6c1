use egui::{Color32, CornerRadius, Stroke, Visuals, epaint::Shadow, style::WidgetVisuals};

use crate::health::HealthStatus;

#[derive(Clone, Copy)]
pub struct Palette {
    pub bg_app: Color32,
    pub bg_sidebar: Color32,
    pub card_fill: Color32,
    pub card_text: Color32,
    pub card_accent: Color32,
    pub track: Color32,
    pub panel_outline: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub chart_bar: Color32,
}

pub fn palette() -> Palette {
    Palette {
        bg_app: Color32::from_rgb(0x0e, 0x11, 0x17),
        bg_sidebar: Color32::from_rgb(0x1f, 0x29, 0x37),
        card_fill: Color32::WHITE,
        card_text: Color32::BLACK,
        card_accent: Color32::from_rgb(0x4e, 0x73, 0xdf),
        track: Color32::from_rgb(0x2c, 0x2c, 0x2c),
        panel_outline: Color32::from_rgb(38, 42, 48),
        text_primary: Color32::from_rgb(230, 232, 236),
        text_muted: Color32::from_rgb(140, 146, 155),
        chart_bar: Color32::from_rgb(0x1f, 0x77, 0xb4),
    }
}

pub fn status_color(status: HealthStatus) -> Color32 {
    let (r, g, b) = status.rgb();
    Color32::from_rgb(r, g, b)
}

pub fn apply_visuals(visuals: &mut Visuals) {
    let palette = palette();
    visuals.window_fill = palette.bg_app;
    visuals.panel_fill = palette.bg_app;
    visuals.override_text_color = Some(palette.text_primary);
    visuals.extreme_bg_color = palette.bg_app;
    visuals.faint_bg_color = palette.bg_sidebar;
    visuals.selection.stroke = Stroke::new(1.0, palette.card_accent);
    visuals.widgets.noninteractive.bg_fill = palette.bg_sidebar;
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, palette.text_primary);
    set_rounded(&mut visuals.widgets.inactive, palette);
    set_rounded(&mut visuals.widgets.hovered, palette);
    set_rounded(&mut visuals.widgets.active, palette);
    set_rounded(&mut visuals.widgets.open, palette);
    visuals.popup_shadow = Shadow::NONE;
}

fn set_rounded(vis: &mut WidgetVisuals, palette: Palette) {
    vis.corner_radius = CornerRadius::same(4);
    vis.bg_stroke = Stroke::new(1.0, palette.panel_outline);
    vis.fg_stroke = Stroke::new(1.0, palette.text_primary);
}
