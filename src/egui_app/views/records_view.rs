use eframe::egui;
use serde_json::Value;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::colors;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        ui.colored_label(colors::TEXT_LIGHT, egui::RichText::new("Records").size(16.0).strong());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if state.records_loading {
                ui.spinner();
            } else if ui.small_button("Refresh").clicked() {
                state.refresh_records();
            }
        });
    });
    ui.separator();

    if state.records.is_empty() && !state.records_loading {
        ui.colored_label(colors::TEXT_SECONDARY, "No records");
        return;
    }

    let mut clicked: Option<Value> = None;
    egui::ScrollArea::vertical().show(ui, |ui| {
        for record in &state.records {
            let id = record.get("id").and_then(Value::as_i64);
            let selected = id.is_some() && id == state.selected_id;
            let label = match (id, state.record_url(record)) {
                (Some(id), Some(url)) => format!("#{}  {}", id, url),
                (Some(id), None) => format!("#{}  (no URL)", id),
                (None, _) => "(invalid record)".to_string(),
            };

            let text = egui::RichText::new(label).color(if selected {
                colors::TEXT_LIGHT
            } else {
                colors::TEXT_SECONDARY
            });
            if ui.selectable_label(selected, text).clicked() {
                clicked = Some(record.clone());
            }
        }
    });

    if let Some(record) = clicked {
        state.select_record(&record);
    }
}
