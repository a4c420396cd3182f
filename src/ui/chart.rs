use std::collections::BTreeSet;

use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Plot};

use crate::state::AppState;

/// Share of one x unit taken by a state's group of bars.
const GROUP_WIDTH: f64 = 0.8;

// ---------------------------------------------------------------------------
// Births by state and gender (central panel)
// ---------------------------------------------------------------------------

/// Grouped bar chart: one group per state, one bar per gender.
pub fn births_chart(ui: &mut Ui, state: &AppState, height: f32) {
    ui.heading("Total Births by State and Gender");

    let mut states: Vec<String> = state
        .totals
        .iter()
        .map(|t| t.state_of_residence.clone())
        .collect();
    states.dedup();

    let genders: Vec<String> = state
        .totals
        .iter()
        .map(|t| t.sex_of_infant.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let bar_width = GROUP_WIDTH / genders.len().max(1) as f64;

    let labels = states.clone();

    Plot::new("births_chart")
        .legend(Legend::default())
        .height(height)
        .x_axis_label("State of Residence")
        .y_axis_label("Births")
        .x_axis_formatter(move |mark: GridMark, _range| {
            let rounded = mark.value.round();
            if (mark.value - rounded).abs() > 1e-6 || rounded < 0.0 {
                return String::new();
            }
            labels.get(rounded as usize).cloned().unwrap_or_default()
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (series, gender) in genders.iter().enumerate() {
                let offset = -GROUP_WIDTH / 2.0 + bar_width * (series as f64 + 0.5);
                let series_name = if gender.is_empty() { "(blank)" } else { gender.as_str() };

                let bars: Vec<Bar> = state
                    .totals
                    .iter()
                    .filter(|t| t.sex_of_infant == *gender)
                    .filter_map(|t| {
                        let x = states.iter().position(|s| *s == t.state_of_residence)?;
                        Some(
                            Bar::new(x as f64 + offset, t.births)
                                .width(bar_width)
                                .name(format!("{} / {series_name}", t.state_of_residence)),
                        )
                    })
                    .collect();

                let color = state
                    .color_map
                    .as_ref()
                    .map(|cm| cm.color_for(gender))
                    .unwrap_or(Color32::LIGHT_BLUE);

                plot_ui.bar_chart(BarChart::new(bars).name(series_name).color(color));
            }
        });
}
