//! Task records for kb.
//!
//! Tasks are stored as JSON lines in `tasks.jsonl` inside the board data
//! directory. The board engine only reads them; all mutation goes through
//! the store so it can be journaled for undo.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::error::{Error, Result};

/// Lifecycle status of a task. Statuses double as board columns.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Backlog,
    Planned,
    InProgress,
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Backlog,
        TaskStatus::Planned,
        TaskStatus::InProgress,
        TaskStatus::Done,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Backlog => "backlog",
            TaskStatus::Planned => "planned",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "backlog" => Ok(TaskStatus::Backlog),
            "planned" => Ok(TaskStatus::Planned),
            "in_progress" | "in-progress" | "doing" => Ok(TaskStatus::InProgress),
            "done" => Ok(TaskStatus::Done),
            other => Err(Error::InvalidArgument(format!(
                "unknown status '{other}' (expected backlog, planned, in_progress, done)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" | "med" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(Error::InvalidArgument(format!(
                "unknown priority '{other}' (expected low, medium, high)"
            ))),
        }
    }
}

fn default_priority() -> Priority {
    Priority::Medium
}

/// A single task card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub status: TaskStatus,
    #[serde(default = "default_priority")]
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_task_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Create a new task with a fresh ulid id and current timestamps.
    pub fn new(title: impl Into<String>, status: TaskStatus) -> Self {
        let now = Utc::now();
        Self {
            id: Ulid::new().to_string().to_ascii_lowercase(),
            title: title.into(),
            status,
            priority: default_priority(),
            project_id: None,
            due_date: None,
            parent_task_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Project bucket key for grouping; empty project ids count as unset.
    pub fn project_key(&self) -> Option<&str> {
        self.project_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    /// Whether the task is due on the given calendar day.
    /// Tasks without a due date never match.
    pub fn due_on(&self, day: NaiveDate) -> bool {
        self.due_date == Some(day)
    }
}
