use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};

pub mod records_view;
pub mod widget_view;

pub fn render_top_bar(ctx: &egui::Context, state: &mut AppState) {
    let frame_style = egui::Frame::default()
        .fill(colors::TOP_BAR_BG)
        .inner_margin(egui::Margin::symmetric(12, 8));

    egui::TopBottomPanel::top("top_panel")
        .frame(frame_style)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.colored_label(colors::TEXT_LIGHT, egui::RichText::new("Grist Fetch").size(18.0).strong());

                if let Some(location) = state.location() {
                    ui.add_space(12.0);
                    ui.colored_label(colors::TEXT_SECONDARY, location);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add_space(16.0);

                    if !state.is_connected() {
                        ui.colored_label(colors::ERROR, "Not connected");
                    } else if state.sync_state().fetch_in_flight {
                        ui.spinner();
                        ui.colored_label(colors::WARNING, "Syncing");
                    } else {
                        ui.colored_label(colors::SUCCESS, "Ready");
                    }

                    if let Some(source) = state.config.as_ref().and_then(|c| c.source()) {
                        ui.add_space(16.0);
                        ui.colored_label(colors::TEXT_SECONDARY, source.display().to_string());
                    }
                });
            });
        });
}

/// Red banner for configuration and startup problems
pub fn render_error_banner(ctx: &egui::Context, state: &mut AppState) {
    let Some(message) = state.error.clone() else {
        return;
    };

    egui::TopBottomPanel::top("error_banner")
        .frame(styles::error_banner_frame())
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.colored_label(colors::TEXT_LIGHT, egui::RichText::new(message).strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Dismiss").clicked() {
                        state.clear_error();
                    }
                });
            });
        });
}

pub fn render_records_panel(ctx: &egui::Context, state: &mut AppState) {
    if !state.is_connected() {
        return;
    }

    egui::SidePanel::left("records_panel")
        .frame(styles::record_list_frame())
        .default_width(260.0)
        .show(ctx, |ui| records_view::render(ui, state));
}

pub fn render_main_panel(ctx: &egui::Context, state: &mut AppState) {
    egui::CentralPanel::default()
        .frame(styles::main_frame())
        .show(ctx, |ui| widget_view::render(ui, state));
}
