//! Theme Styling Functions

use eframe::egui::{self, CornerRadius, Stroke};
use super::colors;

/// Apply the global theme to the egui context
pub fn apply_global_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    style.visuals.panel_fill = colors::MAIN_BG;

    style.visuals.widgets.inactive.bg_fill = colors::PREVIEW_BG;
    style.visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, colors::TEXT_DARK);

    style.visuals.widgets.hovered.bg_fill = colors::SELECTED_ITEM;
    style.visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, colors::TEXT_LIGHT);

    style.visuals.widgets.active.bg_fill = colors::BUTTON_PRIMARY;
    style.visuals.widgets.active.fg_stroke = Stroke::new(1.0, colors::TEXT_LIGHT);

    style.visuals.selection.bg_fill = colors::SELECTED_ITEM;
    style.visuals.selection.stroke = Stroke::new(1.0, colors::TEXT_LIGHT);

    ctx.set_style(style);
}

/// Frame for the record list side panel
pub fn record_list_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::RECORD_LIST_BG)
        .inner_margin(egui::Margin::same(8))
}

/// Frame for the main widget area
pub fn main_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::MAIN_BG)
        .inner_margin(egui::Margin::same(16))
}

/// Frame around the fetched content preview
pub fn preview_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::PREVIEW_BG)
        .stroke(Stroke::new(1.0, colors::PREVIEW_BORDER))
        .corner_radius(CornerRadius::same(6))
        .inner_margin(egui::Margin::same(10))
}

/// Red banner used for configuration and startup errors
pub fn error_banner_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::ERROR_BG)
        .inner_margin(egui::Margin::same(12))
}
