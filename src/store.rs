//! The task/project store.
//!
//! The board engine is a pure reader; every mutation comes through here so
//! it can be journaled with inverse snapshots for undo. Each mutation
//! holds the store lock across its read-modify-write cycle, rewrites the
//! affected JSONL file atomically, then appends the op record.

use chrono::{NaiveDate, Utc};

use crate::error::{Error, Result};
use crate::lock::{FileLock, DEFAULT_LOCK_TIMEOUT_MS};
use crate::oplog::{OpLog, OpRecord, UndoData};
use crate::project::Project;
use crate::storage::Storage;
use crate::task::{Priority, Task, TaskStatus};

/// Fields the caller controls when creating a task.
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub title: String,
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub project_id: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub parent_task_id: Option<String>,
}

/// Store over the board data directory.
pub struct Store {
    storage: Storage,
    oplog: OpLog,
}

impl Store {
    pub fn open(storage: Storage) -> Result<Self> {
        storage.init()?;
        let oplog = OpLog::for_storage(&storage);
        Ok(Self { storage, oplog })
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn oplog(&self) -> &OpLog {
        &self.oplog
    }

    /// The task collection in store order. Malformed rows are skipped.
    pub fn load_tasks(&self) -> Result<Vec<Task>> {
        self.storage.read_records(&self.storage.tasks_file())
    }

    /// The project collection in store order. Malformed rows are skipped.
    pub fn load_projects(&self) -> Result<Vec<Project>> {
        self.storage.read_records(&self.storage.projects_file())
    }

    /// Create a task. Fails if the referenced project or parent task does
    /// not exist.
    pub fn create_task(&self, draft: TaskDraft) -> Result<Task> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(Error::InvalidArgument("task title is empty".to_string()));
        }

        let _lock = self.lock()?;
        let mut tasks = self.load_tasks()?;

        if let Some(project_id) = draft.project_id.as_deref() {
            let projects = self.load_projects()?;
            if !projects.iter().any(|p| p.id == project_id) {
                return Err(Error::ProjectNotFound(project_id.to_string()));
            }
        }
        if let Some(parent_id) = draft.parent_task_id.as_deref() {
            if !tasks.iter().any(|t| t.id == parent_id) {
                return Err(Error::TaskNotFound(parent_id.to_string()));
            }
        }

        let mut task = Task::new(title, draft.status.unwrap_or(TaskStatus::Backlog));
        if let Some(priority) = draft.priority {
            task.priority = priority;
        }
        task.project_id = draft.project_id;
        task.due_date = draft.due_date;
        task.parent_task_id = draft.parent_task_id;

        tasks.push(task.clone());
        self.storage
            .write_records(&self.storage.tasks_file(), &tasks)?;

        let mut record = OpRecord::new(format!("task add {}", task.title));
        record.undo_data = Some(UndoData {
            created_task_ids: vec![task.id.clone()],
            ..UndoData::default()
        });
        self.oplog.append(&record)?;

        Ok(task)
    }

    /// Move a task to another status column.
    pub fn move_task(&self, id: &str, status: TaskStatus) -> Result<Task> {
        let _lock = self.lock()?;
        let mut tasks = self.load_tasks()?;

        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| Error::TaskNotFound(id.to_string()))?;
        let before = task.clone();
        task.status = status;
        task.updated_at = Utc::now();
        let after = task.clone();

        self.storage
            .write_records(&self.storage.tasks_file(), &tasks)?;

        let mut record = OpRecord::new(format!("task move {} {}", id, status.as_str()));
        record.undo_data = Some(UndoData {
            replaced_tasks: vec![before],
            ..UndoData::default()
        });
        self.oplog.append(&record)?;

        Ok(after)
    }

    /// Delete a task.
    pub fn delete_task(&self, id: &str) -> Result<Task> {
        let _lock = self.lock()?;
        let mut tasks = self.load_tasks()?;

        let index = tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| Error::TaskNotFound(id.to_string()))?;
        let removed = tasks.remove(index);

        self.storage
            .write_records(&self.storage.tasks_file(), &tasks)?;

        let mut record = OpRecord::new(format!("task delete {id}"));
        record.undo_data = Some(UndoData {
            deleted_tasks: vec![removed.clone()],
            ..UndoData::default()
        });
        self.oplog.append(&record)?;

        Ok(removed)
    }

    /// Set the status of several tasks in one journaled operation.
    pub fn bulk_update_status(&self, ids: &[String], status: TaskStatus) -> Result<Vec<Task>> {
        if ids.is_empty() {
            return Err(Error::InvalidArgument("no task ids given".to_string()));
        }

        let _lock = self.lock()?;
        let mut tasks = self.load_tasks()?;

        for id in ids {
            if !tasks.iter().any(|t| &t.id == id) {
                return Err(Error::TaskNotFound(id.clone()));
            }
        }

        let now = Utc::now();
        let mut before = Vec::new();
        let mut after = Vec::new();
        for task in tasks.iter_mut() {
            if ids.contains(&task.id) {
                before.push(task.clone());
                task.status = status;
                task.updated_at = now;
                after.push(task.clone());
            }
        }

        self.storage
            .write_records(&self.storage.tasks_file(), &tasks)?;

        let mut record = OpRecord::new(format!(
            "task bulk-status {} {}",
            ids.join(","),
            status.as_str()
        ));
        record.undo_data = Some(UndoData {
            replaced_tasks: before,
            ..UndoData::default()
        });
        self.oplog.append(&record)?;

        Ok(after)
    }

    /// Create a project. Fails if the parent does not exist.
    pub fn create_project(
        &self,
        name: &str,
        parent_id: Option<String>,
        color: Option<String>,
    ) -> Result<Project> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidArgument("project name is empty".to_string()));
        }

        let _lock = self.lock()?;
        let mut projects = self.load_projects()?;

        if let Some(parent) = parent_id.as_deref() {
            if !projects.iter().any(|p| p.id == parent) {
                return Err(Error::ProjectNotFound(parent.to_string()));
            }
        }

        let mut project = Project::new(name);
        project.parent_id = parent_id;
        if let Some(color) = color {
            project.color = color;
        }

        projects.push(project.clone());
        self.storage
            .write_records(&self.storage.projects_file(), &projects)?;

        let mut record = OpRecord::new(format!("project add {name}"));
        record.undo_data = Some(UndoData {
            created_project_ids: vec![project.id.clone()],
            ..UndoData::default()
        });
        self.oplog.append(&record)?;

        Ok(project)
    }

    /// Apply inverse snapshots under the store lock, returning the inverse
    /// of the application itself (so the undo can be undone).
    pub(crate) fn apply_undo(&self, undo: &UndoData) -> Result<UndoData> {
        let _lock = self.lock()?;
        let mut tasks = self.load_tasks()?;
        let mut projects = self.load_projects()?;
        let mut inverse = UndoData::default();

        for id in &undo.created_task_ids {
            if let Some(index) = tasks.iter().position(|t| &t.id == id) {
                inverse.deleted_tasks.push(tasks.remove(index));
            }
        }

        for snapshot in &undo.replaced_tasks {
            match tasks.iter_mut().find(|t| t.id == snapshot.id) {
                Some(current) => {
                    inverse.replaced_tasks.push(current.clone());
                    *current = snapshot.clone();
                }
                None => {
                    inverse.created_task_ids.push(snapshot.id.clone());
                    tasks.push(snapshot.clone());
                }
            }
        }

        for snapshot in &undo.deleted_tasks {
            if !tasks.iter().any(|t| t.id == snapshot.id) {
                inverse.created_task_ids.push(snapshot.id.clone());
                tasks.push(snapshot.clone());
            }
        }

        for id in &undo.created_project_ids {
            if let Some(index) = projects.iter().position(|p| &p.id == id) {
                inverse.deleted_projects.push(projects.remove(index));
            }
        }

        for snapshot in &undo.deleted_projects {
            if !projects.iter().any(|p| p.id == snapshot.id) {
                inverse.created_project_ids.push(snapshot.id.clone());
                projects.push(snapshot.clone());
            }
        }

        self.storage
            .write_records(&self.storage.tasks_file(), &tasks)?;
        self.storage
            .write_records(&self.storage.projects_file(), &projects)?;

        Ok(inverse)
    }

    fn lock(&self) -> Result<FileLock> {
        FileLock::acquire(self.storage.store_lock_file(), DEFAULT_LOCK_TIMEOUT_MS)
    }
}
