use serde::Serialize;

use super::fields::LogicalField;

// ---------------------------------------------------------------------------
// RawTable – the CSV as read, before binding
// ---------------------------------------------------------------------------

/// Header row (already normalized) and string cells, row-major.
///
/// Every row has exactly `columns.len()` cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Record – one bound, coerced row
// ---------------------------------------------------------------------------

/// One natality row after binding and type coercion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub state_of_residence: String,
    pub month: String,
    pub month_code: Option<f64>,
    pub year_code: Option<f64>,
    pub sex_of_infant: String,
    pub births: f64,
    /// Cells of unbound columns, aligned with [`NatalityTable::extra_columns`].
    #[serde(skip)]
    pub extra: Vec<String>,
}

impl Record {
    /// Text of one of the categorical fields; `None` for numeric fields.
    pub fn text(&self, field: LogicalField) -> Option<&str> {
        match field {
            LogicalField::StateOfResidence => Some(&self.state_of_residence),
            LogicalField::Month => Some(&self.month),
            LogicalField::SexOfInfant => Some(&self.sex_of_infant),
            _ => None,
        }
    }

    /// Display form of any logical field.
    pub fn display(&self, field: LogicalField) -> String {
        match field {
            LogicalField::MonthCode => format_number(self.month_code),
            LogicalField::YearCode => format_number(self.year_code),
            LogicalField::Births => format_number(Some(self.births)),
            other => self.text(other).unwrap_or_default().to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// NatalityTable – the bound dataset handed to the dashboard
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NatalityTable {
    /// Header order of the source with bound columns renamed to their
    /// logical names.
    pub columns: Vec<String>,
    /// Unbound columns carried through unchanged.
    pub extra_columns: Vec<String>,
    pub records: Vec<Record>,
    /// Input rows discarded because `births` was not numeric.
    pub dropped_rows: usize,
}

impl NatalityTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Coercion helpers
// ---------------------------------------------------------------------------

/// Lenient numeric parse: surrounding whitespace ignored, empty / `NaN` /
/// non-numeric text is absent.
pub fn parse_numeric(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Integral values without a fractional part, absent as an empty string.
pub fn format_number(v: Option<f64>) -> String {
    match v {
        Some(v) if v.fract() == 0.0 && v.abs() < 1e15 => format!("{}", v as i64),
        Some(v) => format!("{v}"),
        None => String::new(),
    }
}
