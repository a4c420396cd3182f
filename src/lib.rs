//! Loader and query layer for provisional natality data.
//!
//! The desktop dashboard (`natality-viewer`) and the headless
//! `natality_report` binary both build on [`data`].

pub mod data;

/// File name looked up in the working directory when no path is given.
pub const DEFAULT_DATASET: &str = "Provisional_Natality_2025_CDC.csv";

/// Environment variable overriding the dataset path.
pub const DATASET_ENV: &str = "NATALITY_DATA";

/// Dataset path: first CLI argument, then `NATALITY_DATA`, then
/// [`DEFAULT_DATASET`].
pub fn dataset_path_from_env() -> std::path::PathBuf {
    resolve_dataset_path(
        std::env::args_os().nth(1),
        std::env::var_os(DATASET_ENV),
    )
}

fn resolve_dataset_path(
    arg: Option<std::ffi::OsString>,
    env: Option<std::ffi::OsString>,
) -> std::path::PathBuf {
    arg.or(env)
        .filter(|p| !p.is_empty())
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|| std::path::PathBuf::from(DEFAULT_DATASET))
}
