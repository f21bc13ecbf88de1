use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::widget::{SyncPhase, SyncState};

/// URL line, status line, Fetch button and the content preview
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let sync = state.sync_state();

    ui.horizontal(|ui| {
        ui.colored_label(colors::TEXT_DARK, egui::RichText::new("URL:").strong());
        match &sync.active_url {
            Some(url) => ui.hyperlink_to(url.as_str(), url),
            None => ui.colored_label(colors::TEXT_SECONDARY, "-"),
        };
    });
    ui.add_space(8.0);

    ui.horizontal(|ui| {
        let button = egui::Button::new(egui::RichText::new("Fetch").color(colors::TEXT_LIGHT))
            .fill(colors::BUTTON_PRIMARY)
            .min_size(egui::vec2(90.0, 28.0));
        let enabled = state.is_connected() && !sync.fetch_in_flight;
        if ui.add_enabled(enabled, button).clicked() {
            state.request_fetch();
        }

        ui.add_space(12.0);
        if !sync.status.is_empty() {
            ui.colored_label(status_color(&sync), sync.status.as_str());
        }
    });
    ui.add_space(12.0);

    if let Some(content) = &sync.last_fetched_content {
        ui.colored_label(colors::TEXT_SECONDARY, "Sanitized content");
        styles::preview_frame().show(ui, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add(
                    egui::Label::new(egui::RichText::new(content.as_str()).monospace().color(colors::TEXT_DARK))
                        .wrap(),
                );
            });
        });
    }
}

fn status_color(sync: &SyncState) -> egui::Color32 {
    match sync.phase {
        SyncPhase::Done => colors::SUCCESS,
        SyncPhase::Error => colors::ERROR,
        SyncPhase::Fetching | SyncPhase::Updating => colors::WARNING,
        SyncPhase::Idle | SyncPhase::NoUrl => colors::TEXT_SECONDARY,
    }
}
