//! Storage layout for the board data directory.
//!
//! All state lives under one directory, chosen by `--dir`/`KB_DIR` or
//! defaulting to the platform user data dir:
//!
//! ```text
//! <data dir>/
//!   tasks.jsonl      # task collection, one JSON object per line
//!   projects.jsonl   # project collection
//!   settings.toml    # persisted UI settings
//!   store.lock       # held across store read-modify-write cycles
//!   oplog/           # one JSON record per mutation
//!     <timestamp>-<uuid>.json
//! ```
//!
//! Reads are forgiving: a malformed row is skipped with a warning and the
//! rest of the collection still loads; a missing file is an empty
//! collection. The board must always come up, even over a damaged store.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Serialize};

use crate::error::{Error, Result};
use crate::lock;

const TASKS_FILE: &str = "tasks.jsonl";
const PROJECTS_FILE: &str = "projects.jsonl";
const SETTINGS_FILE: &str = "settings.toml";
const STORE_LOCK_FILE: &str = "store.lock";
const OPLOG_DIR: &str = "oplog";

/// Path manager for the board data directory.
#[derive(Debug, Clone)]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Resolve the data directory: explicit flag first, then the platform
    /// user data dir.
    pub fn resolve(explicit: Option<PathBuf>) -> Result<Self> {
        if let Some(root) = explicit {
            return Ok(Self::new(root));
        }
        let dirs = ProjectDirs::from("", "", "kb").ok_or_else(|| {
            Error::OperationFailed("could not determine a data directory; pass --dir".to_string())
        })?;
        Ok(Self::new(dirs.data_dir().to_path_buf()))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn tasks_file(&self) -> PathBuf {
        self.root.join(TASKS_FILE)
    }

    pub fn projects_file(&self) -> PathBuf {
        self.root.join(PROJECTS_FILE)
    }

    pub fn settings_file(&self) -> PathBuf {
        self.root.join(SETTINGS_FILE)
    }

    pub fn store_lock_file(&self) -> PathBuf {
        self.root.join(STORE_LOCK_FILE)
    }

    pub fn oplog_dir(&self) -> PathBuf {
        self.root.join(OPLOG_DIR)
    }

    /// Create the directory structure.
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        fs::create_dir_all(self.oplog_dir())?;
        Ok(())
    }

    /// Read a JSONL collection of identified records.
    ///
    /// A missing file is an empty collection. A row that is not a JSON
    /// object, lacks a non-empty string `id`, or fails to deserialize is
    /// skipped with a warning; well-formed rows still load.
    pub fn read_records<T: DeserializeOwned>(&self, path: &Path) -> Result<Vec<T>> {
        if !path.exists() {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(path)?;
        let mut records = Vec::new();
        for (line_no, line) in contents.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let value: serde_json::Value = match serde_json::from_str(trimmed) {
                Ok(value) => value,
                Err(err) => {
                    tracing::warn!(
                        file = %path.display(),
                        line = line_no + 1,
                        %err,
                        "skipping unparsable row"
                    );
                    continue;
                }
            };

            let has_id = value
                .as_object()
                .and_then(|obj| obj.get("id"))
                .and_then(|id| id.as_str())
                .map(|id| !id.trim().is_empty())
                .unwrap_or(false);
            if !has_id {
                tracing::warn!(
                    file = %path.display(),
                    line = line_no + 1,
                    "skipping row without an id"
                );
                continue;
            }

            match serde_json::from_value::<T>(value) {
                Ok(record) => records.push(record),
                Err(err) => {
                    tracing::warn!(
                        file = %path.display(),
                        line = line_no + 1,
                        %err,
                        "skipping malformed row"
                    );
                }
            }
        }

        Ok(records)
    }

    /// Atomically rewrite a JSONL collection.
    pub fn write_records<T: Serialize>(&self, path: &Path, records: &[T]) -> Result<()> {
        let mut contents = String::new();
        for record in records {
            contents.push_str(&serde_json::to_string(record)?);
            contents.push('\n');
        }
        lock::write_atomic_str(path, &contents)
    }
}
