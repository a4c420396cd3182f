use std::path::PathBuf;

use eframe::egui;

use crate::state::AppState;
use crate::ui::{chart, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct NatalityApp {
    pub state: AppState,
}

impl NatalityApp {
    pub fn new(data_path: PathBuf) -> Self {
        Self {
            state: AppState::new(data_path),
        }
    }
}

impl eframe::App for NatalityApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: chart + detail table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Provisional Natality Data Dashboard");
            ui.label("Birth Analysis by State and Gender");
            ui.separator();

            let Some(outcome) = self.state.outcome.clone() else {
                return;
            };
            if !outcome.is_ok() {
                panels::load_failure(ui, &outcome);
                return;
            }

            if self.state.visible_indices.is_empty() {
                ui.colored_label(
                    egui::Color32::YELLOW,
                    "No data available for the selected filters.",
                );
                return;
            }

            let chart_height = ui.available_height() * 0.5;
            chart::births_chart(ui, &self.state, chart_height);
            ui.separator();
            table::detail_table(ui, &self.state);
        });
    }
}
