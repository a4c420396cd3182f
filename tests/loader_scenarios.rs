use std::collections::HashSet;
use std::io::Write;
use std::path::Path;

use natality_viewer::data::fields::LogicalField;
use natality_viewer::data::loader::{load_file, LoadOutcome, LoadStatus};
use natality_viewer::data::normalize::{canonical_key, normalize};
use natality_viewer::data::resolver::{resolve_columns, MissingReason};

fn write_csv(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(body.as_bytes()).unwrap();
    path
}

fn bound_header(outcome: &LoadOutcome, field: LogicalField) -> String {
    match outcome {
        LoadOutcome::Ok { binding, .. } => binding.get(field).unwrap().name.clone(),
        other => panic!("expected ok, got {:?}", other.status()),
    }
}

#[test]
fn exact_headers_bind_every_field() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "natality.csv",
        "State of Residence,Month,Month Code,Year Code,Sex of Infant,Births\n\
         Ohio,January,1,2025,Female,100\n",
    );
    let outcome = load_file(&path);
    assert_eq!(outcome.status(), LoadStatus::Ok);
    for field in LogicalField::ALL {
        assert_eq!(bound_header(&outcome, field), field.as_str());
    }
}

#[test]
fn alias_headers_bind_uniquely() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "natality.csv",
        "State,Month,Month Code,Year Code,Gender,Birth Count\n\
         Ohio,January,1,2025,Female,100\n",
    );
    let outcome = load_file(&path);
    assert_eq!(outcome.status(), LoadStatus::Ok);
    assert_eq!(bound_header(&outcome, LogicalField::StateOfResidence), "state");
    assert_eq!(bound_header(&outcome, LogicalField::SexOfInfant), "gender");
    assert_eq!(bound_header(&outcome, LogicalField::Births), "birth_count");

    let table = outcome.table().unwrap();
    let unique: HashSet<&String> = table.columns.iter().collect();
    assert_eq!(unique.len(), table.columns.len());
    for field in LogicalField::ALL {
        assert!(table.columns.iter().any(|c| c == field.as_str()));
    }
}

#[test]
fn competing_state_aliases_are_missing() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "natality.csv",
        "State,Residence State,Month,Month Code,Year Code,Gender,Births\n\
         Ohio,Ohio,January,1,2025,Female,100\n",
    );
    let outcome = load_file(&path);
    assert_eq!(outcome.status(), LoadStatus::MissingColumns);
    let LoadOutcome::MissingColumns { raw, resolution } = &outcome else {
        panic!("expected missing columns");
    };
    assert_eq!(resolution.missing_fields(), vec![LogicalField::StateOfResidence]);
    assert!(matches!(
        resolution.missing[0].reason,
        MissingReason::Ambiguous { .. }
    ));
    assert!(raw.columns.contains(&"residence_state".to_string()));
}

#[test]
fn bad_births_dropped_bad_month_code_kept() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "natality.csv",
        "State,Month,Month Code,Year Code,Gender,Births\n\
         Ohio,January,1,2025,Female,unknown\n\
         Ohio,Unknown,N/A,2025,Male,12\n\
         Ohio,March,3,2025,Male,30\n",
    );
    let outcome = load_file(&path);
    let table = outcome.table().unwrap();
    assert_eq!(table.len(), 2);
    assert!(table.records.iter().all(|r| r.month != "January"));
    let unknown = table.records.iter().find(|r| r.month == "Unknown").unwrap();
    assert_eq!(unknown.month_code, None);
    assert_eq!(unknown.births, 12.0);
}

#[test]
fn row_count_drops_only_non_numeric_births() {
    let dir = tempfile::tempdir().unwrap();
    let births = ["1", "", "x", "2.5", " 3 ", "NaN", "-4", "1e2"];
    let mut body = String::from("State,Month,Month Code,Year Code,Gender,Births\n");
    for b in births {
        body.push_str(&format!("Ohio,May,bad,bad,F,{b}\n"));
    }
    let path = write_csv(dir.path(), "natality.csv", &body);
    let table = load_file(&path).table().cloned().unwrap();
    let bad = births
        .iter()
        .filter(|b| b.trim().parse::<f64>().map_or(true, |v| v.is_nan()))
        .count();
    assert_eq!(table.len(), births.len() - bad);
    assert_eq!(table.dropped_rows, bad);
}

#[test]
fn absent_file_is_file_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let outcome = load_file(&dir.path().join("Provisional_Natality_2025_CDC.csv"));
    assert_eq!(outcome.status(), LoadStatus::FileNotFound);
    assert!(outcome.table().is_none());
}

#[test]
fn directory_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let outcome = load_file(dir.path());
    assert_eq!(outcome.status(), LoadStatus::ReadError);
    assert!(outcome.detail().is_some());
}

#[test]
fn invalid_utf8_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("latin1.csv");
    std::fs::write(&path, b"State,Births\n\xff\xfe,1\n").unwrap();
    assert_eq!(load_file(&path).status(), LoadStatus::ReadError);
}

#[test]
fn separator_variants_share_a_canonical_key() {
    let variants = [
        "Sex of Infant",
        "sex-of-infant",
        "SEX_OF_INFANT",
        "sex   of   infant",
        "Sex_of-Infant",
    ];
    let keys: HashSet<String> = variants.iter().map(|v| canonical_key(v)).collect();
    assert_eq!(keys.len(), 1);
    for v in variants {
        let once = normalize(v);
        assert_eq!(normalize(&once), once);
    }
}

#[test]
fn exact_births_header_wins_over_aliases() {
    let cols: Vec<String> = ["Live Births", "Births", "Number of Births"]
        .iter()
        .map(|h| normalize(h))
        .collect();
    let res = resolve_columns(&cols);
    assert_eq!(res.matched.get(LogicalField::Births).unwrap().index, 1);
}
