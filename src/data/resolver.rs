use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use super::fields::LogicalField;
use super::normalize::canonical_key;

// ---------------------------------------------------------------------------
// Binding types
// ---------------------------------------------------------------------------

/// A physical column chosen for a logical field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoundColumn {
    /// Position of the column in the header row.
    pub index: usize,
    /// Header text (normalized) at that position.
    pub name: String,
}

/// Logical field → physical column, built once per load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SchemaBinding {
    columns: BTreeMap<LogicalField, BoundColumn>,
}

impl SchemaBinding {
    pub fn get(&self, field: LogicalField) -> Option<&BoundColumn> {
        self.columns.get(&field)
    }

    /// Bindings in field declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (LogicalField, &BoundColumn)> {
        self.columns.iter().map(|(f, c)| (*f, c))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// All six fields are bound.
    pub fn is_complete(&self) -> bool {
        self.columns.len() == LogicalField::ALL.len()
    }

    /// Field bound to the column at `index`, if any.
    pub fn field_for_index(&self, index: usize) -> Option<LogicalField> {
        self.columns
            .iter()
            .find(|(_, c)| c.index == index)
            .map(|(f, _)| *f)
    }

    fn insert(&mut self, field: LogicalField, column: BoundColumn) {
        self.columns.insert(field, column);
    }
}

/// Why a field could not be bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum MissingReason {
    /// No header matched the field name or any alias.
    Unmatched,
    /// Several headers matched; none is picked.
    Ambiguous { candidates: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingField {
    pub field: LogicalField,
    #[serde(flatten)]
    pub reason: MissingReason,
}

/// Result of matching a header row against the logical fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub matched: SchemaBinding,
    /// Unbound fields, in declaration order.
    pub missing: Vec<MissingField>,
}

impl Resolution {
    pub fn missing_fields(&self) -> Vec<LogicalField> {
        self.missing.iter().map(|m| m.field).collect()
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Match normalized `columns` to the six logical fields.
///
/// Per field: a header equal to the field name wins outright; otherwise the
/// candidates are every header whose canonical key equals the field's own
/// canonical key or one of its aliases. Exactly one candidate binds, zero or
/// several leave the field missing.
pub fn resolve_columns(columns: &[String]) -> Resolution {
    let mut by_key: HashMap<String, Vec<usize>> = HashMap::new();
    for (idx, col) in columns.iter().enumerate() {
        by_key.entry(canonical_key(col)).or_default().push(idx);
    }

    let mut resolution = Resolution::default();

    for field in LogicalField::ALL {
        let exact: Vec<usize> = columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.as_str() == field.as_str())
            .map(|(i, _)| i)
            .collect();

        let candidates = if exact.is_empty() {
            canonical_candidates(field, &by_key)
        } else {
            exact
        };

        log::debug!(
            "resolving {field}: candidates {:?}",
            candidates.iter().map(|&i| &columns[i]).collect::<Vec<_>>()
        );

        match candidates.as_slice() {
            [only] => resolution.matched.insert(
                field,
                BoundColumn {
                    index: *only,
                    name: columns[*only].clone(),
                },
            ),
            [] => resolution.missing.push(MissingField {
                field,
                reason: MissingReason::Unmatched,
            }),
            many => resolution.missing.push(MissingField {
                field,
                reason: MissingReason::Ambiguous {
                    candidates: many.iter().map(|&i| columns[i].clone()).collect(),
                },
            }),
        }
    }

    resolution
}

/// Columns under the field's own key, then under each alias key, first-seen
/// order, no repeats.
fn canonical_candidates(field: LogicalField, by_key: &HashMap<String, Vec<usize>>) -> Vec<usize> {
    let own = canonical_key(field.as_str());
    let keys = std::iter::once(own.as_str()).chain(field.aliases().iter().copied());

    let mut candidates: Vec<usize> = Vec::new();
    for key in keys {
        if let Some(indices) = by_key.get(key) {
            for &idx in indices {
                if !candidates.contains(&idx) {
                    candidates.push(idx);
                }
            }
        }
    }
    candidates
}
