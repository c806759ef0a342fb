//! Mutation log for the board store.
//!
//! Every store mutation appends one record under `oplog/`, carrying the
//! inverse snapshots needed to undo it. Undo itself appends a record that
//! points back at what it undid, so undoing twice redoes.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::lock::{self, FileLock, DEFAULT_LOCK_TIMEOUT_MS};
use crate::project::Project;
use crate::storage::Storage;
use crate::task::Task;

/// One logged mutation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OpRecord {
    pub op_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub command: String,
    /// Set on undo records: the operation this record reverses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub undoes: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub undo_data: Option<UndoData>,
}

impl OpRecord {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            op_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            command: command.into(),
            undoes: None,
            undo_data: None,
        }
    }
}

/// Inverse snapshots for one mutation.
///
/// Undo removes `created_task_ids`, restores `replaced_tasks` to their
/// recorded snapshots, and re-inserts `deleted_tasks`; likewise for
/// projects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct UndoData {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub created_task_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub replaced_tasks: Vec<Task>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deleted_tasks: Vec<Task>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub created_project_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deleted_projects: Vec<Project>,
}

impl UndoData {
    pub fn is_empty(&self) -> bool {
        self.created_task_ids.is_empty()
            && self.replaced_tasks.is_empty()
            && self.deleted_tasks.is_empty()
            && self.created_project_ids.is_empty()
            && self.deleted_projects.is_empty()
    }
}

/// Operation log manager
#[derive(Debug, Clone)]
pub struct OpLog {
    dir: PathBuf,
}

impl OpLog {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn for_storage(storage: &Storage) -> Self {
        Self::new(storage.oplog_dir())
    }

    /// Append a new operation record to the log
    pub fn append(&self, record: &OpRecord) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let lock_path = oplog_lock_path(&self.dir);
        let _lock = FileLock::acquire(&lock_path, DEFAULT_LOCK_TIMEOUT_MS)?;

        let file_name = record_filename(record);
        let path = self.dir.join(file_name);
        if path.exists() {
            return Err(Error::OperationFailed(format!(
                "oplog entry already exists: {}",
                path.display()
            )));
        }

        let json = serde_json::to_vec_pretty(record)?;
        lock::write_atomic(&path, &json)?;
        Ok(path)
    }

    /// Read all operation records (sorted by filename, oldest first)
    pub fn read_all(&self) -> Result<Vec<OpRecord>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let lock_path = oplog_lock_path(&self.dir);
        let _lock = FileLock::acquire(&lock_path, DEFAULT_LOCK_TIMEOUT_MS)?;

        let mut paths: Vec<PathBuf> = fs::read_dir(&self.dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("json"))
            .collect();

        paths.sort();

        let mut records = Vec::new();
        for path in paths {
            let content = fs::read_to_string(&path)?;
            let record: OpRecord = serde_json::from_str(&content)?;
            records.push(record);
        }

        Ok(records)
    }

    /// Read records newest first, optionally limited.
    pub fn read_recent(&self, limit: Option<usize>) -> Result<Vec<OpRecord>> {
        let mut records = self.read_all()?;
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        if let Some(limit) = limit {
            records.truncate(limit);
        }
        Ok(records)
    }
}

/// Format a single operation record for human-readable output
pub fn format_record(record: &OpRecord) -> String {
    let ts = record.timestamp.to_rfc3339();
    let undoes = match record.undoes {
        Some(target) => format!(" undoes={target}"),
        None => String::new(),
    };
    let undoable = if record.undo_data.is_some() { "yes" } else { "no" };
    format!(
        "{ts} {op_id} undoable={undoable}{undoes} command=\"{command}\"",
        op_id = record.op_id,
        command = record.command
    )
}

fn oplog_lock_path(dir: &Path) -> PathBuf {
    dir.join("oplog.lock")
}

fn record_filename(record: &OpRecord) -> String {
    let ts = record.timestamp.format("%Y%m%dT%H%M%S%.3fZ");
    format!("{}-{}.json", ts, record.op_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskStatus;
    use tempfile::TempDir;

    #[test]
    fn append_and_read_records() {
        let temp = TempDir::new().unwrap();
        let log = OpLog::new(temp.path().join("oplog"));

        let mut record = OpRecord::new("task add Write docs");
        record.undo_data = Some(UndoData {
            created_task_ids: vec!["t1".to_string()],
            ..UndoData::default()
        });
        let path = log.append(&record).unwrap();
        assert!(path.exists());

        let records = log.read_all().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0], record);
    }

    #[test]
    fn read_recent_orders_newest_first() {
        let temp = TempDir::new().unwrap();
        let log = OpLog::new(temp.path().join("oplog"));

        let mut first = OpRecord::new("task add a");
        first.timestamp = Utc::now() - chrono::Duration::seconds(10);
        let second = OpRecord::new("task add b");
        log.append(&first).unwrap();
        log.append(&second).unwrap();

        let records = log.read_recent(None).unwrap();
        assert_eq!(records[0].command, "task add b");
        assert_eq!(records[1].command, "task add a");

        let limited = log.read_recent(Some(1)).unwrap();
        assert_eq!(limited.len(), 1);
    }

    #[test]
    fn undo_data_emptiness() {
        assert!(UndoData::default().is_empty());
        let data = UndoData {
            deleted_tasks: vec![Task::new("t", TaskStatus::Done)],
            ..UndoData::default()
        };
        assert!(!data.is_empty());
    }

    #[test]
    fn format_record_mentions_undo_target() {
        let mut record = OpRecord::new("undo");
        let target = Uuid::new_v4();
        record.undoes = Some(target);
        let line = format_record(&record);
        assert!(line.contains(&target.to_string()));
        assert!(line.contains("undoable=no"));
    }
}
