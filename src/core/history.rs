//! Bounded, date-keyed wallpaper history persisted as JSON
//!
//! The history is a most-recent-first list holding at most one record per
//! calendar date. Each run loads it, applies exactly one upsert and writes it
//! back atomically.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::PersistError;
use crate::utils::write_atomic;

use super::types::WallpaperRecord;

const HISTORY_FILE: &str = "history.json";
const LATEST_FILE: &str = "latest.json";

/// Insert `record` into `history`, or replace the entry with the same date in place.
///
/// New dates go to the front. The result is truncated to `max_records`,
/// dropping the oldest (tail) entries.
pub(crate) fn upsert(
    mut history: Vec<WallpaperRecord>,
    record: WallpaperRecord,
    max_records: usize,
) -> Vec<WallpaperRecord> {
    match history.iter().position(|r| r.date == record.date) {
        Some(index) => history[index] = record,
        None => history.insert(0, record),
    }
    history.truncate(max_records);
    history
}

/// JSON-backed history in a data directory.
///
/// Single writer: nothing guards the read-modify-write in [`HistoryStore::record`],
/// so callers must not run two pipelines against the same directory at once.
#[derive(Debug, Clone)]
pub(crate) struct HistoryStore {
    history_path: PathBuf,
    latest_path: PathBuf,
    max_records: usize,
}

impl HistoryStore {
    pub(crate) fn new(data_dir: &Path, max_records: usize) -> Self {
        Self {
            history_path: data_dir.join(HISTORY_FILE),
            latest_path: data_dir.join(LATEST_FILE),
            max_records,
        }
    }

    pub(crate) fn history_path(&self) -> &Path {
        &self.history_path
    }

    pub(crate) fn latest_path(&self) -> &Path {
        &self.latest_path
    }

    /// Load the stored history; a missing file is an empty history
    pub(crate) fn load(&self) -> Result<Vec<WallpaperRecord>, PersistError> {
        let content = match fs::read_to_string(&self.history_path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(PersistError::Read {
                    path: self.history_path.clone(),
                    source,
                });
            }
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content).map_err(|source| PersistError::Parse {
            path: self.history_path.clone(),
            source,
        })
    }

    pub(crate) fn save(&self, history: &[WallpaperRecord]) -> Result<(), PersistError> {
        write_pretty(&self.history_path, history)
    }

    /// Load, upsert `record`, save. Returns the history as written.
    pub(crate) fn record(
        &self,
        record: WallpaperRecord,
    ) -> Result<Vec<WallpaperRecord>, PersistError> {
        let history = upsert(self.load()?, record, self.max_records);
        self.save(&history)?;
        Ok(history)
    }

    /// Persist the single most recent record, independent of the history list
    pub(crate) fn write_latest(&self, record: &WallpaperRecord) -> Result<(), PersistError> {
        write_pretty(&self.latest_path, record)
    }
}

fn write_pretty<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), PersistError> {
    let json = serde_json::to_string_pretty(value).map_err(PersistError::Serialize)?;
    write_atomic(path, json.as_bytes()).map_err(|source| PersistError::Write {
        path: path.to_path_buf(),
        source,
    })
}
