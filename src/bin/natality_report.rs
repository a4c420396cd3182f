//! Headless load: prints the load outcome, column bindings and births by
//! state and gender as JSON. Exits non-zero unless the load is `ok`.

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use natality_viewer::data::aggregate::{births_by_state_and_sex, total_births, StateSexTotal};
use natality_viewer::data::loader::{load_file, LoadOutcome, LoadStatus};
use natality_viewer::data::resolver::{MissingField, SchemaBinding};

#[derive(Serialize)]
struct Report<'a> {
    path: String,
    status: LoadStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bindings: Option<&'a SchemaBinding>,
    #[serde(skip_serializing_if = "slice_is_empty")]
    missing: &'a [MissingField],
    #[serde(skip_serializing_if = "slice_is_empty")]
    columns: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<Summary>,
}

#[derive(Serialize)]
struct Summary {
    records: usize,
    dropped_rows: usize,
    total_births: f64,
    by_state_and_gender: Vec<StateSexTotal>,
}

fn slice_is_empty<T>(s: &&[T]) -> bool {
    s.is_empty()
}

fn build_report<'a>(path: &Path, outcome: &'a LoadOutcome) -> Report<'a> {
    let mut report = Report {
        path: path.display().to_string(),
        status: outcome.status(),
        detail: outcome.detail(),
        bindings: None,
        missing: &[],
        columns: &[],
        summary: None,
    };
    match outcome {
        LoadOutcome::Ok { table, binding } => {
            let all: Vec<usize> = (0..table.len()).collect();
            report.bindings = Some(binding);
            report.columns = &table.columns;
            report.summary = Some(Summary {
                records: table.len(),
                dropped_rows: table.dropped_rows,
                total_births: total_births(table, &all),
                by_state_and_gender: births_by_state_and_sex(table, &all),
            });
        }
        LoadOutcome::MissingColumns { raw, resolution } => {
            report.bindings = Some(&resolution.matched);
            report.missing = &resolution.missing;
            report.columns = &raw.columns;
        }
        LoadOutcome::FileNotFound { .. } | LoadOutcome::ReadError { .. } => {}
    }
    report
}

fn exit_code(status: LoadStatus) -> i32 {
    match status {
        LoadStatus::Ok => 0,
        LoadStatus::FileNotFound => 2,
        LoadStatus::ReadError => 3,
        LoadStatus::MissingColumns => 4,
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let path = natality_viewer::dataset_path_from_env();
    let outcome = load_file(&path);
    let report = build_report(&path, &outcome);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, &report).context("writing JSON report")?;
    writeln!(out).context("writing JSON report")?;
    out.flush().context("flushing stdout")?;

    let code = exit_code(outcome.status());
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
