use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use super::fields::LogicalField;
use super::model::{parse_numeric, NatalityTable, RawTable, Record};
use super::normalize::normalize;
use super::resolver::{resolve_columns, Resolution, SchemaBinding};

// ---------------------------------------------------------------------------
// Outcome types
// ---------------------------------------------------------------------------

/// Faults while reading the raw CSV. Never escapes [`load_file`]; folded
/// into a [`LoadOutcome`] instead.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("no columns to parse from file")]
    NoHeader,
    #[error("row {row}: expected {expected} fields, saw {found}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    Ok,
    FileNotFound,
    ReadError,
    MissingColumns,
}

impl LoadStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            LoadStatus::Ok => "ok",
            LoadStatus::FileNotFound => "file_not_found",
            LoadStatus::ReadError => "read_error",
            LoadStatus::MissingColumns => "missing_columns",
        }
    }
}

impl fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a load can end in. Only `Ok` carries a usable table.
#[derive(Debug, Clone)]
pub enum LoadOutcome {
    Ok {
        table: NatalityTable,
        binding: SchemaBinding,
    },
    FileNotFound {
        path: PathBuf,
    },
    ReadError {
        message: String,
    },
    /// The file was read but some fields could not be bound uniquely. The
    /// unbound table is kept so its headers can be shown for diagnosis.
    MissingColumns {
        raw: RawTable,
        resolution: Resolution,
    },
}

impl LoadOutcome {
    pub fn status(&self) -> LoadStatus {
        match self {
            LoadOutcome::Ok { .. } => LoadStatus::Ok,
            LoadOutcome::FileNotFound { .. } => LoadStatus::FileNotFound,
            LoadOutcome::ReadError { .. } => LoadStatus::ReadError,
            LoadOutcome::MissingColumns { .. } => LoadStatus::MissingColumns,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, LoadOutcome::Ok { .. })
    }

    pub fn table(&self) -> Option<&NatalityTable> {
        match self {
            LoadOutcome::Ok { table, .. } => Some(table),
            _ => None,
        }
    }

    /// Short human-readable detail for non-`ok` outcomes.
    pub fn detail(&self) -> Option<String> {
        match self {
            LoadOutcome::Ok { .. } => None,
            LoadOutcome::FileNotFound { path } => Some(path.display().to_string()),
            LoadOutcome::ReadError { message } => Some(message.clone()),
            LoadOutcome::MissingColumns { resolution, .. } => Some(
                resolution
                    .missing_fields()
                    .iter()
                    .map(|f| f.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Read, bind and coerce a natality CSV. Always returns an outcome.
pub fn load_file(path: &Path) -> LoadOutcome {
    match read_csv_file(path) {
        Ok(raw) => bind(raw),
        Err(ReadError::NotFound(path)) => {
            log::warn!("dataset not found at {}", path.display());
            LoadOutcome::FileNotFound { path }
        }
        Err(e) => read_failure(e),
    }
}

/// Same as [`load_file`] for an already-open source.
pub fn load_reader<R: Read>(rdr: R) -> LoadOutcome {
    match read_csv(rdr) {
        Ok(raw) => bind(raw),
        Err(e) => read_failure(e),
    }
}

fn read_failure(e: ReadError) -> LoadOutcome {
    log::error!("failed to read dataset: {e}");
    LoadOutcome::ReadError {
        message: e.to_string(),
    }
}

// ---------------------------------------------------------------------------
// CSV reading
// ---------------------------------------------------------------------------

pub fn read_csv_file(path: &Path) -> Result<RawTable, ReadError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ReadError::NotFound(path.to_path_buf()),
        _ => ReadError::Io(e),
    })?;
    read_csv(io::BufReader::new(file))
}

/// Comma-separated with a header row. Short rows are padded with empty
/// cells; long rows are an error.
pub fn read_csv<R: Read>(rdr: R) -> Result<RawTable, ReadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(rdr);

    let columns: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    if columns.is_empty() {
        return Err(ReadError::NoHeader);
    }

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result?;
        if record.len() > columns.len() {
            return Err(ReadError::RaggedRow {
                row: row_no + 1,
                expected: columns.len(),
                found: record.len(),
            });
        }
        let mut row: Vec<String> = record.iter().map(|c| c.to_string()).collect();
        row.resize(columns.len(), String::new());
        rows.push(row);
    }

    Ok(RawTable { columns, rows })
}

// ---------------------------------------------------------------------------
// Binding and coercion
// ---------------------------------------------------------------------------

/// Column positions of the six logical fields in a fully bound table.
struct FieldIndex {
    state_of_residence: usize,
    month: usize,
    month_code: usize,
    year_code: usize,
    sex_of_infant: usize,
    births: usize,
}

impl FieldIndex {
    fn from_binding(binding: &SchemaBinding) -> Option<Self> {
        let at = |f: LogicalField| binding.get(f).map(|c| c.index);
        Some(FieldIndex {
            state_of_residence: at(LogicalField::StateOfResidence)?,
            month: at(LogicalField::Month)?,
            month_code: at(LogicalField::MonthCode)?,
            year_code: at(LogicalField::YearCode)?,
            sex_of_infant: at(LogicalField::SexOfInfant)?,
            births: at(LogicalField::Births)?,
        })
    }
}

/// Normalize headers, resolve the logical fields and coerce every row.
pub fn bind(mut raw: RawTable) -> LoadOutcome {
    raw.columns = raw.columns.iter().map(|c| normalize(c)).collect();

    let resolution = resolve_columns(&raw.columns);
    let idx = match FieldIndex::from_binding(&resolution.matched) {
        Some(idx) if resolution.missing.is_empty() => idx,
        _ => {
            log::warn!(
                "missing required fields [{}] among columns {:?}",
                resolution
                    .missing_fields()
                    .iter()
                    .map(|f| f.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
                raw.columns
            );
            return LoadOutcome::MissingColumns { raw, resolution };
        }
    };

    for (field, col) in resolution.matched.iter() {
        log::debug!("bound {field} <- {:?} (column {})", col.name, col.index);
    }

    let binding = resolution.matched;
    let columns: Vec<String> = raw
        .columns
        .iter()
        .enumerate()
        .map(|(i, name)| match binding.field_for_index(i) {
            Some(field) => field.as_str().to_string(),
            None => name.clone(),
        })
        .collect();
    let extra_idx: Vec<usize> = (0..raw.columns.len())
        .filter(|&i| binding.field_for_index(i).is_none())
        .collect();
    let extra_columns: Vec<String> = extra_idx.iter().map(|&i| raw.columns[i].clone()).collect();

    let input_rows = raw.rows.len();
    let mut records = Vec::with_capacity(input_rows);
    for row in &raw.rows {
        let Some(births) = parse_numeric(&row[idx.births]) else {
            continue;
        };
        records.push(Record {
            state_of_residence: row[idx.state_of_residence].trim().to_string(),
            month: row[idx.month].trim().to_string(),
            month_code: parse_numeric(&row[idx.month_code]),
            year_code: parse_numeric(&row[idx.year_code]),
            sex_of_infant: row[idx.sex_of_infant].trim().to_string(),
            births,
            extra: extra_idx.iter().map(|&i| row[i].clone()).collect(),
        });
    }
    let dropped_rows = input_rows - records.len();

    log::info!(
        "loaded {} records from {} rows ({} dropped for non-numeric births)",
        records.len(),
        input_rows,
        dropped_rows
    );

    LoadOutcome::Ok {
        table: NatalityTable {
            columns,
            extra_columns,
            records,
            dropped_rows,
        },
        binding,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_str(csv: &str) -> LoadOutcome {
        load_reader(csv.as_bytes())
    }

    const HEADER: &str = "State of Residence,Month,Month Code,Year Code,Sex of Infant,Births\n";

    #[test]
    fn exact_headers_load_ok() {
        let out = load_str(&format!("{HEADER}Ohio,January,1,2025,F,100\n"));
        assert_eq!(out.status(), LoadStatus::Ok);
        let table = out.table().unwrap();
        assert_eq!(
            table.columns,
            vec!["state_of_residence", "month", "month_code", "year_code", "sex_of_infant", "births"]
        );
        assert_eq!(table.records[0].births, 100.0);
        assert_eq!(table.records[0].year_code, Some(2025.0));
    }

    #[test]
    fn alias_headers_are_renamed_and_extras_kept() {
        let csv = "Notes,State,Month,Month Code,Year Code,Gender,Birth Count\n\
                   hi,  Texas ,March ,3,2025, M ,7\n";
        let out = load_str(csv);
        let LoadOutcome::Ok { table, binding } = out else {
            panic!("expected ok");
        };
        assert_eq!(binding.get(LogicalField::SexOfInfant).unwrap().name, "gender");
        assert_eq!(table.columns[0], "notes");
        assert_eq!(table.columns[1], "state_of_residence");
        assert_eq!(table.columns[6], "births");
        assert_eq!(table.extra_columns, vec!["notes"]);
        let r = &table.records[0];
        assert_eq!(r.state_of_residence, "Texas");
        assert_eq!(r.month, "March");
        assert_eq!(r.sex_of_infant, "M");
        assert_eq!(r.extra, vec!["hi"]);
    }

    #[test]
    fn bad_births_drop_row_bad_codes_keep_it() {
        let csv = format!(
            "{HEADER}Ohio,January,1,2025,F,unknown\n\
             Ohio,February,N/A,2025,F,12\n\
             Ohio,March,3,,M,\n\
             Ohio,April,4,x,M,8\n"
        );
        let out = load_str(&csv);
        let table = out.table().unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.dropped_rows, 2);
        assert_eq!(table.records[0].month, "February");
        assert_eq!(table.records[0].month_code, None);
        assert_eq!(table.records[1].year_code, None);
        assert_eq!(table.records[1].births, 8.0);
    }

    #[test]
    fn missing_columns_keep_raw_table() {
        let out = load_str("State,Residence State,Month,Births\nOhio,Ohio,May,3\n");
        assert_eq!(out.status(), LoadStatus::MissingColumns);
        assert_eq!(
            out.detail().unwrap(),
            "state_of_residence, month_code, year_code, sex_of_infant"
        );
        let LoadOutcome::MissingColumns { raw, .. } = out else {
            panic!("expected missing columns");
        };
        assert_eq!(raw.columns, vec!["state", "residence_state", "month", "births"]);
        assert_eq!(raw.len(), 1);
    }

    #[test]
    fn short_rows_are_padded() {
        let out = load_str(&format!("{HEADER}Ohio,January,1,2025,F,5\nOhio,June\n"));
        let table = out.table().unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.dropped_rows, 1);
    }

    #[test]
    fn long_rows_are_read_errors() {
        let out = load_str(&format!("{HEADER}Ohio,January,1,2025,F,5,extra\n"));
        assert_eq!(out.status(), LoadStatus::ReadError);
        assert!(out.detail().unwrap().contains("row 1"));
    }

    #[test]
    fn empty_input_is_read_error() {
        let out = load_str("");
        assert_eq!(out.status(), LoadStatus::ReadError);
        assert!(out.table().is_none());
    }

    #[test]
    fn status_strings() {
        assert_eq!(LoadStatus::Ok.to_string(), "ok");
        assert_eq!(LoadStatus::FileNotFound.to_string(), "file_not_found");
        assert_eq!(LoadStatus::ReadError.to_string(), "read_error");
        assert_eq!(LoadStatus::MissingColumns.to_string(), "missing_columns");
        assert_eq!(
            serde_json::to_string(&LoadStatus::MissingColumns).unwrap(),
            "\"missing_columns\""
        );
    }
}
