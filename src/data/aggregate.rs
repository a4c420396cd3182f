use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;

use super::model::NatalityTable;

/// Total births for one (state, sex) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateSexTotal {
    pub state_of_residence: String,
    pub sex_of_infant: String,
    pub births: f64,
}

/// Sum births over `indices`, grouped by state then sex, both ascending.
pub fn births_by_state_and_sex(table: &NatalityTable, indices: &[usize]) -> Vec<StateSexTotal> {
    let mut sums: BTreeMap<(&str, &str), f64> = BTreeMap::new();
    for r in indices.iter().filter_map(|&i| table.records.get(i)) {
        *sums
            .entry((r.state_of_residence.as_str(), r.sex_of_infant.as_str()))
            .or_insert(0.0) += r.births;
    }
    sums.into_iter()
        .map(|((state, sex), births)| StateSexTotal {
            state_of_residence: state.to_string(),
            sex_of_infant: sex.to_string(),
            births,
        })
        .collect()
}

pub fn total_births(table: &NatalityTable, indices: &[usize]) -> f64 {
    indices
        .iter()
        .filter_map(|&i| table.records.get(i))
        .map(|r| r.births)
        .sum()
}

/// `indices` reordered for the detail table: state, then month code
/// (absent last), then sex. Ties keep table order.
pub fn detail_rows(table: &NatalityTable, indices: &[usize]) -> Vec<usize> {
    let mut rows: Vec<usize> = indices
        .iter()
        .copied()
        .filter(|&i| i < table.records.len())
        .collect();
    rows.sort_by(|&a, &b| {
        let (ra, rb) = (&table.records[a], &table.records[b]);
        ra.state_of_residence
            .cmp(&rb.state_of_residence)
            .then_with(|| match (ra.month_code, rb.month_code) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
            .then_with(|| ra.sex_of_infant.cmp(&rb.sex_of_infant))
    });
    rows
}
