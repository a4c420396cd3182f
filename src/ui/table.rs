use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use natality_viewer::data::fields::LogicalField;

use crate::state::AppState;

/// Filtered records, six logical columns, sorted by state, month code, gender.
pub fn detail_table(ui: &mut Ui, state: &AppState) {
    let Some(table) = state.table() else {
        return;
    };
    let order = &state.detail_order;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .columns(Column::auto().at_least(90.0), LogicalField::ALL.len())
        .header(20.0, |mut header| {
            for field in LogicalField::ALL {
                header.col(|ui| {
                    ui.strong(field.label());
                });
            }
        })
        .body(|body| {
            body.rows(18.0, order.len(), |mut row| {
                let record = &table.records[order[row.index()]];
                for field in LogicalField::ALL {
                    row.col(|ui| {
                        ui.label(record.display(field));
                    });
                }
            });
        });
}
