use std::path::{Path, PathBuf};
use std::sync::Arc;

use natality_viewer::data::aggregate::{births_by_state_and_sex, detail_rows, StateSexTotal};
use natality_viewer::data::cache::LoadCache;
use natality_viewer::data::fields::LogicalField;
use natality_viewer::data::filter::{filtered_indices, FilterOptions, FilterState, Selection};
use natality_viewer::data::loader::LoadOutcome;
use natality_viewer::data::model::NatalityTable;

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// CSV currently shown.
    pub data_path: PathBuf,

    cache: LoadCache,

    /// Result of the last load; `None` only before the first one.
    pub outcome: Option<Arc<LoadOutcome>>,

    /// Values offered by the side-panel pickers.
    pub options: FilterOptions,

    /// Month / Gender / State selections.
    pub filters: FilterState,

    /// Indices of records passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Chart data for `visible_indices`.
    pub totals: Vec<StateSexTotal>,

    /// `visible_indices` in detail-table order.
    pub detail_order: Vec<usize>,

    /// One colour per gender series.
    pub color_map: Option<ColorMap>,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(data_path: PathBuf) -> Self {
        let mut state = Self {
            data_path,
            cache: LoadCache::new(),
            outcome: None,
            options: FilterOptions::default(),
            filters: FilterState::default(),
            visible_indices: Vec::new(),
            totals: Vec::new(),
            detail_order: Vec::new(),
            color_map: None,
            status_message: None,
        };
        state.reload();
        state
    }

    /// Switch to another CSV.
    pub fn open(&mut self, path: &Path) {
        self.data_path = path.to_path_buf();
        self.cache.clear();
        self.reload();
    }

    /// Re-read the current CSV if it changed on disk.
    pub fn reload(&mut self) {
        let outcome = self.cache.load(&self.data_path);
        if let Some(current) = &self.outcome {
            if Arc::ptr_eq(current, &outcome) {
                return;
            }
        }
        self.set_outcome(outcome);
    }

    /// Ingest a new load result, reset filters and colours.
    fn set_outcome(&mut self, outcome: Arc<LoadOutcome>) {
        self.filters = FilterState::default();
        match outcome.table() {
            Some(table) => {
                log::info!(
                    "showing {} records from {}",
                    table.len(),
                    self.data_path.display()
                );
                self.options = FilterOptions::from_table(table);
                self.color_map = Some(ColorMap::new(&self.options.genders));
                self.status_message = None;
            }
            None => {
                self.options = FilterOptions::default();
                self.color_map = None;
                self.status_message = Some(format!("Load status: {}", outcome.status()));
            }
        }
        self.outcome = Some(outcome);
        self.refilter();
    }

    pub fn table(&self) -> Option<&NatalityTable> {
        self.outcome.as_deref().and_then(LoadOutcome::table)
    }

    /// Recompute visible rows, chart totals and table order after a filter
    /// change.
    pub fn refilter(&mut self) {
        let Some(outcome) = self.outcome.clone() else {
            return;
        };
        match outcome.table() {
            Some(table) => {
                self.visible_indices = filtered_indices(table, &self.filters);
                self.totals = births_by_state_and_sex(table, &self.visible_indices);
                self.detail_order = detail_rows(table, &self.visible_indices);
            }
            None => {
                self.visible_indices.clear();
                self.totals.clear();
                self.detail_order.clear();
            }
        }
    }

    /// Toggle one value of a picker.
    pub fn toggle_filter_value(&mut self, field: LogicalField, value: &str) {
        if let Some(selection) = self.filters.selection_mut(field) {
            selection.toggle(value);
            self.refilter();
        }
    }

    /// Put a picker back on "All".
    pub fn select_all(&mut self, field: LogicalField) {
        if let Some(selection) = self.filters.selection_mut(field) {
            *selection = Selection::All;
            self.refilter();
        }
    }

    /// Leave "All" with nothing selected.
    pub fn select_none(&mut self, field: LogicalField) {
        if let Some(selection) = self.filters.selection_mut(field) {
            *selection = Selection::Only(Default::default());
            self.refilter();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn state_with(csv: &str) -> (tempfile::NamedTempFile, AppState) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(csv.as_bytes()).unwrap();
        file.flush().unwrap();
        let state = AppState::new(file.path().to_path_buf());
        (file, state)
    }

    const CSV: &str = "State,Month,Month Code,Year Code,Gender,Births\n\
                       Ohio,January,1,2025,F,5\n\
                       Ohio,January,1,2025,M,6\n\
                       Texas,February,2,2025,F,9\n";

    #[test]
    fn new_state_shows_everything() {
        let (_f, state) = state_with(CSV);
        assert_eq!(state.visible_indices, vec![0, 1, 2]);
        assert_eq!(state.totals.len(), 3);
        assert_eq!(state.options.states, vec!["Ohio", "Texas"]);
        assert!(state.status_message.is_none());
    }

    #[test]
    fn toggling_narrows_and_all_restores() {
        let (_f, mut state) = state_with(CSV);
        state.toggle_filter_value(LogicalField::StateOfResidence, "Texas");
        assert_eq!(state.visible_indices, vec![2]);
        state.select_none(LogicalField::SexOfInfant);
        assert!(state.visible_indices.is_empty());
        state.select_all(LogicalField::SexOfInfant);
        state.select_all(LogicalField::StateOfResidence);
        assert_eq!(state.visible_indices.len(), 3);
    }

    #[test]
    fn failed_load_has_no_rows() {
        let (_f, state) = state_with("a,b\n1,2\n");
        assert!(state.table().is_none());
        assert!(state.visible_indices.is_empty());
        assert_eq!(
            state.status_message.as_deref(),
            Some("Load status: missing_columns")
        );
    }
}
