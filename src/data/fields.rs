use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// LogicalField – the six columns every natality table must provide
// ---------------------------------------------------------------------------

/// A required semantic column, located regardless of the source header text.
///
/// Variant order is the resolution order and the order in which missing
/// fields are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicalField {
    StateOfResidence,
    Month,
    MonthCode,
    YearCode,
    SexOfInfant,
    Births,
}

impl LogicalField {
    /// Every field, in declaration order.
    pub const ALL: [LogicalField; 6] = [
        LogicalField::StateOfResidence,
        LogicalField::Month,
        LogicalField::MonthCode,
        LogicalField::YearCode,
        LogicalField::SexOfInfant,
        LogicalField::Births,
    ];

    /// Column name the field is renamed to once bound.
    pub fn as_str(self) -> &'static str {
        match self {
            LogicalField::StateOfResidence => "state_of_residence",
            LogicalField::Month => "month",
            LogicalField::MonthCode => "month_code",
            LogicalField::YearCode => "year_code",
            LogicalField::SexOfInfant => "sex_of_infant",
            LogicalField::Births => "births",
        }
    }

    /// Known synonyms, already in canonical-key form.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            LogicalField::StateOfResidence => &[
                "stateofresidence",
                "stateresidence",
                "residencestate",
                "state",
            ],
            LogicalField::Month => &["month"],
            LogicalField::MonthCode => &["monthcode"],
            LogicalField::YearCode => &["yearcode"],
            LogicalField::SexOfInfant => &[
                "sexofinfant",
                "infantsex",
                "sex",
                "gender",
                "infantgender",
            ],
            LogicalField::Births => &[
                "births",
                "birthcount",
                "birthcounts",
                "numberofbirths",
                "livebirths",
                "totalbirths",
            ],
        }
    }

    /// Human-facing label used by the dashboard.
    pub fn label(self) -> &'static str {
        match self {
            LogicalField::StateOfResidence => "State of Residence",
            LogicalField::Month => "Month",
            LogicalField::MonthCode => "Month Code",
            LogicalField::YearCode => "Year Code",
            LogicalField::SexOfInfant => "Gender",
            LogicalField::Births => "Births",
        }
    }
}

impl fmt::Display for LogicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
