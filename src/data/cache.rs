use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use super::loader::{load_file, LoadOutcome};

/// Identity of a file's content as far as the cache cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fingerprint {
    len: u64,
    modified: Option<SystemTime>,
}

impl Fingerprint {
    fn of(path: &Path) -> Option<Self> {
        let meta = fs::metadata(path).ok()?;
        Some(Fingerprint {
            len: meta.len(),
            modified: meta.modified().ok(),
        })
    }
}

/// Memoizes the last [`load_file`] result per path.
///
/// A hit requires the same file length and modification time as when the
/// entry was stored. Outcomes for files that cannot be stat'ed are never
/// stored.
#[derive(Debug, Default)]
pub struct LoadCache {
    entry: Option<(PathBuf, Fingerprint, Arc<LoadOutcome>)>,
}

impl LoadCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, path: &Path) -> Arc<LoadOutcome> {
        let Some(fingerprint) = Fingerprint::of(path) else {
            log::debug!("cache bypass for {}", path.display());
            self.entry = None;
            return Arc::new(load_file(path));
        };

        if let Some((cached_path, cached_fp, outcome)) = &self.entry {
            if cached_path == path && *cached_fp == fingerprint {
                log::debug!("cache hit for {}", path.display());
                return Arc::clone(outcome);
            }
        }

        log::debug!("cache miss for {}", path.display());
        let outcome = Arc::new(load_file(path));
        self.entry = Some((path.to_path_buf(), fingerprint, Arc::clone(&outcome)));
        outcome
    }

    pub fn clear(&mut self) {
        self.entry = None;
    }
}
