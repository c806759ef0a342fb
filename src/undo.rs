//! Undo of store mutations via the operation log.
//!
//! Selection picks the most recent record carrying undo data that no
//! later record has already reversed. The undo itself is journaled with
//! the inverse snapshots, so running undo again redoes.

use std::collections::HashSet;

use uuid::Uuid;

use crate::error::{Error, Result};
use crate::oplog::{OpRecord, UndoData};
use crate::store::Store;

/// Options for undoing an operation.
#[derive(Debug, Clone, Default)]
pub struct UndoOptions {
    pub op_id: Option<Uuid>,
}

/// Summary of an undo operation.
#[derive(Debug, Clone, serde::Serialize)]
pub struct UndoSummary {
    pub op_id: Uuid,
    pub undone_command: String,
    pub removed_tasks: Vec<String>,
    pub restored_tasks: Vec<String>,
    pub removed_projects: Vec<String>,
    pub restored_projects: Vec<String>,
}

/// Undo the last operation (or a specific op id if provided).
pub fn undo(store: &Store, options: UndoOptions) -> Result<UndoSummary> {
    let target = select_record(store, options.op_id)?;
    let undo_data = target
        .undo_data
        .clone()
        .ok_or_else(|| Error::OperationFailed("operation has no undo data".to_string()))?;

    let inverse = store.apply_undo(&undo_data)?;

    let mut record = OpRecord::new(format!("undo {}", target.op_id));
    record.undoes = Some(target.op_id);
    if !inverse.is_empty() {
        record.undo_data = Some(inverse);
    }
    store.oplog().append(&record)?;

    Ok(summarize(&target, &undo_data))
}

fn select_record(store: &Store, op_id: Option<Uuid>) -> Result<OpRecord> {
    let records = store.oplog().read_recent(None)?;

    if let Some(id) = op_id {
        return records
            .into_iter()
            .find(|record| record.op_id == id)
            .ok_or_else(|| Error::OperationFailed(format!("operation not found: {id}")));
    }

    let reversed: HashSet<Uuid> = records.iter().filter_map(|record| record.undoes).collect();

    records
        .into_iter()
        .find(|record| record.undo_data.is_some() && !reversed.contains(&record.op_id))
        .ok_or_else(|| Error::OperationFailed("no undoable operations found".to_string()))
}

fn summarize(target: &OpRecord, applied: &UndoData) -> UndoSummary {
    UndoSummary {
        op_id: target.op_id,
        undone_command: target.command.clone(),
        removed_tasks: applied.created_task_ids.clone(),
        restored_tasks: applied
            .replaced_tasks
            .iter()
            .chain(applied.deleted_tasks.iter())
            .map(|task| task.id.clone())
            .collect(),
        removed_projects: applied.created_project_ids.clone(),
        restored_projects: applied
            .deleted_projects
            .iter()
            .map(|project| project.id.clone())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Storage;
    use crate::store::TaskDraft;
    use crate::task::TaskStatus;
    use tempfile::TempDir;

    fn store() -> (TempDir, Store) {
        let temp = TempDir::new().unwrap();
        let store = Store::open(Storage::new(temp.path().to_path_buf())).unwrap();
        (temp, store)
    }

    #[test]
    fn undo_create_removes_the_task() {
        let (_temp, store) = store();
        let task = store
            .create_task(TaskDraft {
                title: "Oops".to_string(),
                ..TaskDraft::default()
            })
            .unwrap();

        let summary = undo(&store, UndoOptions::default()).unwrap();
        assert_eq!(summary.removed_tasks, vec![task.id]);
        assert!(store.load_tasks().unwrap().is_empty());
    }

    #[test]
    fn undo_move_restores_prior_status() {
        let (_temp, store) = store();
        let task = store
            .create_task(TaskDraft {
                title: "Shuffle".to_string(),
                status: Some(TaskStatus::Planned),
                ..TaskDraft::default()
            })
            .unwrap();
        store.move_task(&task.id, TaskStatus::Done).unwrap();

        undo(&store, UndoOptions::default()).unwrap();
        let tasks = store.load_tasks().unwrap();
        assert_eq!(tasks[0].status, TaskStatus::Planned);
    }

    #[test]
    fn undo_twice_redoes() {
        let (_temp, store) = store();
        store
            .create_task(TaskDraft {
                title: "Flip".to_string(),
                ..TaskDraft::default()
            })
            .unwrap();

        undo(&store, UndoOptions::default()).unwrap();
        assert!(store.load_tasks().unwrap().is_empty());

        // The undo record is itself the newest undoable op.
        undo(&store, UndoOptions::default()).unwrap();
        assert_eq!(store.load_tasks().unwrap().len(), 1);
    }

    #[test]
    fn sequential_undos_walk_backwards() {
        let (_temp, store) = store();
        let a = store
            .create_task(TaskDraft {
                title: "first".to_string(),
                ..TaskDraft::default()
            })
            .unwrap();
        let _b = store
            .create_task(TaskDraft {
                title: "second".to_string(),
                ..TaskDraft::default()
            })
            .unwrap();

        undo(&store, UndoOptions::default()).unwrap();
        let remaining = store.load_tasks().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, a.id);
    }

    #[test]
    fn undo_on_empty_log_fails() {
        let (_temp, store) = store();
        assert!(undo(&store, UndoOptions::default()).is_err());
    }
}
