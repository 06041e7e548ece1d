use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crop_yield_dashboard::data::Facet;
use crop_yield_dashboard::state::AppState;
use crop_yield_dashboard::stats::SummaryStats;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// A filter change requested by a widget, applied after the panel is drawn.
enum FilterAction {
    Toggle(Facet, String),
    SelectAll(Facet),
    Clear(Facet),
}

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    let mut actions = Vec::new();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for facet in Facet::ALL {
                // Options always come from the full dataset.
                let all_values = dataset.facet_options(facet);
                let n_selected = state
                    .selection
                    .selected(facet)
                    .map_or(0, |s| s.len());
                let header_text = format!("{}  ({n_selected}/{})", facet.label(), all_values.len());

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(facet.column_name())
                    .default_open(true)
                    .show(ui, |ui: &mut Ui| {
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                actions.push(FilterAction::SelectAll(facet));
                            }
                            if ui.small_button("None").clicked() {
                                actions.push(FilterAction::Clear(facet));
                            }
                        });

                        for val in all_values {
                            let mut text = RichText::new(val);
                            if facet == Facet::CropType {
                                if let Some(cm) = &state.crop_colors {
                                    text = text.color(cm.color_for(val));
                                }
                            }

                            let mut checked = state.selection.contains(facet, val);
                            if ui.checkbox(&mut checked, text).changed() {
                                actions.push(FilterAction::Toggle(facet, val.clone()));
                            }
                        }
                    });
            }
        });

    for action in actions {
        match action {
            FilterAction::Toggle(facet, value) => state.toggle_filter_value(facet, &value),
            FilterAction::SelectAll(facet) => state.select_all(facet),
            FilterAction::Clear(facet) => state.select_none(facet),
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title bar with record counts and any load error.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading("Smart Farming Crop Yield Dashboard");
        ui.separator();

        if let Some(ds) = state.dataset {
            ui.label(format!(
                "{} records loaded, {} visible",
                ds.len(),
                state.visible_count()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// KPI row
// ---------------------------------------------------------------------------

/// Render the four headline metrics side by side.
pub fn kpi_row(ui: &mut Ui, summary: &SummaryStats) {
    ui.columns(4, |cols| {
        metric(&mut cols[0], "Records", summary.count.to_string());
        metric(&mut cols[1], "Avg Yield", format_metric(summary.mean));
        metric(&mut cols[2], "Max Yield", format_metric(summary.max));
        metric(&mut cols[3], "Min Yield", format_metric(summary.min));
    });
}

fn metric(ui: &mut Ui, label: &str, value: String) {
    ui.group(|ui: &mut Ui| {
        ui.vertical(|ui: &mut Ui| {
            ui.label(RichText::new(label).small());
            ui.heading(value);
        });
    });
}

/// Two-decimal display of a metric, or a dash when there is no data.
pub fn format_metric(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => "—".to_string(),
    }
}
