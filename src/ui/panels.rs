use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use natality_viewer::data::fields::LogicalField;
use natality_viewer::data::filter::Selection;
use natality_viewer::data::loader::LoadOutcome;
use natality_viewer::data::resolver::MissingReason;

use crate::state::AppState;

/// Pickers in side-panel order.
const FILTER_FIELDS: [LogicalField; 3] = [
    LogicalField::Month,
    LogicalField::SexOfInfant,
    LogicalField::StateOfResidence,
];

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.table().is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    // Clone what we need so we can mutate state inside the loop.
    let options = state.options.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for field in FILTER_FIELDS {
                let values = options.for_field(field);
                let Some(selection) = state.filters.selection(field).cloned() else {
                    continue;
                };

                let header_text = match &selection {
                    Selection::All => format!("{}  (All)", field.label()),
                    Selection::Only(set) => {
                        format!("{}  ({}/{})", field.label(), set.len(), values.len())
                    }
                };

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(field.as_str())
                    .default_open(true)
                    .show(ui, |ui: &mut Ui| {
                        let mut all = selection.is_all();
                        if ui.checkbox(&mut all, "All").changed() {
                            if all {
                                state.select_all(field);
                            } else {
                                state.select_none(field);
                            }
                        }

                        for value in values {
                            let mut checked = selection.contains(value);
                            let label = if value.is_empty() { "(blank)" } else { value.as_str() };
                            let mut text = RichText::new(label);
                            if field == LogicalField::SexOfInfant {
                                if let Some(cm) = &state.color_map {
                                    text = text.color(cm.color_for(value));
                                }
                            }
                            if ui.checkbox(&mut checked, text).changed() {
                                state.toggle_filter_value(field, value);
                            }
                        }
                    });
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(table) = state.table() {
            ui.label(format!(
                "{} records loaded, {} visible",
                table.len(),
                state.visible_indices.len()
            ));
            if table.dropped_rows > 0 {
                ui.label(
                    RichText::new(format!("{} rows without numeric births", table.dropped_rows))
                        .weak(),
                );
            }
        }

        ui.separator();
        ui.label(RichText::new(state.data_path.display().to_string()).monospace());

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Load failures
// ---------------------------------------------------------------------------

/// Explain a non-`ok` load. Nothing else is rendered in that case.
pub fn load_failure(ui: &mut Ui, outcome: &LoadOutcome) {
    match outcome {
        LoadOutcome::Ok { .. } => {}
        LoadOutcome::FileNotFound { path } => {
            ui.colored_label(Color32::RED, "Dataset file not found.");
            ui.label(format!("Looked for {}", path.display()));
        }
        LoadOutcome::ReadError { message } => {
            ui.colored_label(Color32::RED, format!("Error reading dataset: {message}"));
        }
        LoadOutcome::MissingColumns { raw, resolution } => {
            let names: Vec<&str> = resolution.missing.iter().map(|m| m.field.as_str()).collect();
            ui.colored_label(
                Color32::RED,
                format!("Missing required logical fields: {}", names.join(", ")),
            );
            for missing in &resolution.missing {
                let why = match &missing.reason {
                    MissingReason::Unmatched => "no matching column".to_string(),
                    MissingReason::Ambiguous { candidates } => {
                        format!("ambiguous between {}", candidates.join(", "))
                    }
                };
                ui.label(format!("• {}: {why}", missing.field));
            }
            ui.separator();
            ui.strong("Columns found in file:");
            for col in &raw.columns {
                ui.monospace(col.as_str());
            }
        }
    }
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open natality data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        log::info!("opening {}", path.display());
        state.open(&path);
    }
}
