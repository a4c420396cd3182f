use std::collections::BTreeSet;

use super::fields::LogicalField;
use super::model::{NatalityTable, Record};

// ---------------------------------------------------------------------------
// Filter options: distinct values offered per categorical field
// ---------------------------------------------------------------------------

/// Values offered in the Month / Gender / State pickers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOptions {
    /// Months ordered by month code (absent codes last), then by name.
    pub months: Vec<String>,
    pub genders: Vec<String>,
    pub states: Vec<String>,
}

impl FilterOptions {
    pub fn from_table(table: &NatalityTable) -> Self {
        FilterOptions {
            months: month_options(&table.records),
            genders: distinct_sorted(&table.records, LogicalField::SexOfInfant),
            states: distinct_sorted(&table.records, LogicalField::StateOfResidence),
        }
    }

    pub fn for_field(&self, field: LogicalField) -> &[String] {
        match field {
            LogicalField::Month => &self.months,
            LogicalField::SexOfInfant => &self.genders,
            LogicalField::StateOfResidence => &self.states,
            _ => &[],
        }
    }
}

fn distinct_sorted(records: &[Record], field: LogicalField) -> Vec<String> {
    records
        .iter()
        .filter_map(|r| r.text(field))
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Each month once, at the position of its smallest code.
fn month_options(records: &[Record]) -> Vec<String> {
    let mut pairs: Vec<(Option<f64>, &str)> = records
        .iter()
        .filter(|r| !r.month.is_empty())
        .map(|r| (r.month_code, r.month.as_str()))
        .collect();
    pairs.sort_by(|(ca, ma), (cb, mb)| {
        let by_code = match (ca, cb) {
            (Some(a), Some(b)) => a.total_cmp(b),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        };
        by_code.then_with(|| ma.cmp(mb))
    });

    let mut seen = BTreeSet::new();
    pairs
        .into_iter()
        .filter(|(_, m)| seen.insert(*m))
        .map(|(_, m)| m.to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Filter predicate
// ---------------------------------------------------------------------------

/// Selection for one field. `All` is the "no filter" sentinel; an empty
/// `Only` set matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    All,
    Only(BTreeSet<String>),
}

impl Selection {
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(set) => set.contains(value),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    pub fn contains(&self, value: &str) -> bool {
        match self {
            Selection::All => false,
            Selection::Only(set) => set.contains(value),
        }
    }

    /// Flip one value. Leaving `All` starts from an empty set.
    pub fn toggle(&mut self, value: &str) {
        match self {
            Selection::All => {
                *self = Selection::Only(BTreeSet::from([value.to_string()]));
            }
            Selection::Only(set) => {
                if !set.remove(value) {
                    set.insert(value.to_string());
                }
            }
        }
    }
}

/// Active selections for the three pickers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub months: Selection,
    pub genders: Selection,
    pub states: Selection,
}

impl FilterState {
    pub fn selection(&self, field: LogicalField) -> Option<&Selection> {
        match field {
            LogicalField::Month => Some(&self.months),
            LogicalField::SexOfInfant => Some(&self.genders),
            LogicalField::StateOfResidence => Some(&self.states),
            _ => None,
        }
    }

    pub fn selection_mut(&mut self, field: LogicalField) -> Option<&mut Selection> {
        match field {
            LogicalField::Month => Some(&mut self.months),
            LogicalField::SexOfInfant => Some(&mut self.genders),
            LogicalField::StateOfResidence => Some(&mut self.states),
            _ => None,
        }
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.months.matches(&record.month)
            && self.genders.matches(&record.sex_of_infant)
            && self.states.matches(&record.state_of_residence)
    }
}

/// Indices of records passing every active selection, in table order.
pub fn filtered_indices(table: &NatalityTable, filters: &FilterState) -> Vec<usize> {
    table
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| filters.matches(r))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(state: &str, month: &str, code: Option<f64>, sex: &str, births: f64) -> Record {
        Record {
            state_of_residence: state.into(),
            month: month.into(),
            month_code: code,
            year_code: Some(2025.0),
            sex_of_infant: sex.into(),
            births,
            extra: Vec::new(),
        }
    }

    pub(crate) fn sample_table() -> NatalityTable {
        NatalityTable {
            records: vec![
                record("Texas", "March", Some(3.0), "M", 10.0),
                record("Ohio", "January", Some(1.0), "F", 5.0),
                record("Ohio", "March", Some(3.0), "M", 7.0),
                record("Alaska", "Unknown", None, "F", 1.0),
                record("", "February", Some(2.0), "", 2.0),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn options_are_distinct_sorted_and_skip_blanks() {
        let opts = FilterOptions::from_table(&sample_table());
        assert_eq!(opts.states, vec!["Alaska", "Ohio", "Texas"]);
        assert_eq!(opts.genders, vec!["F", "M"]);
    }

    #[test]
    fn months_follow_month_code() {
        let opts = FilterOptions::from_table(&sample_table());
        assert_eq!(opts.months, vec!["January", "February", "March", "Unknown"]);
    }

    #[test]
    fn month_with_two_codes_listed_once() {
        let table = NatalityTable {
            records: vec![
                record("A", "May", Some(5.0), "F", 1.0),
                record("A", "May", None, "F", 1.0),
                record("A", "April", Some(4.0), "F", 1.0),
            ],
            ..Default::default()
        };
        let opts = FilterOptions::from_table(&table);
        assert_eq!(opts.months, vec!["April", "May"]);
    }

    #[test]
    fn all_sentinel_keeps_everything() {
        let table = sample_table();
        let idx = filtered_indices(&table, &FilterState::default());
        assert_eq!(idx, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn selections_intersect() {
        let table = sample_table();
        let filters = FilterState {
            states: Selection::Only(BTreeSet::from(["Ohio".to_string()])),
            genders: Selection::Only(BTreeSet::from(["M".to_string()])),
            ..Default::default()
        };
        assert_eq!(filtered_indices(&table, &filters), vec![2]);
    }

    #[test]
    fn empty_selection_matches_nothing() {
        let table = sample_table();
        let filters = FilterState {
            months: Selection::Only(BTreeSet::new()),
            ..Default::default()
        };
        assert!(filtered_indices(&table, &filters).is_empty());
    }

    #[test]
    fn toggle_leaves_all_then_flips() {
        let mut sel = Selection::All;
        sel.toggle("Ohio");
        assert!(sel.contains("Ohio"));
        assert!(!sel.matches("Texas"));
        sel.toggle("Ohio");
        assert_eq!(sel, Selection::Only(BTreeSet::new()));
    }
}
