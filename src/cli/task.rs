//! kb task command implementations.

use chrono::NaiveDate;

use crate::cli::{Globals, TaskCommands};
use crate::error::{Error, Result};
use crate::events::{Event, EventKind};
use crate::output::{emit_success, HumanOutput};
use crate::store::TaskDraft;
use crate::task::{Priority, Task, TaskStatus};

pub fn run(command: TaskCommands, globals: &Globals) -> Result<()> {
    match command {
        TaskCommands::Add {
            title,
            status,
            priority,
            project,
            due,
            parent,
        } => run_add(globals, title, status, priority, project, due, parent),
        TaskCommands::List { status, project } => run_list(globals, status, project),
        TaskCommands::Move { id, status } => run_move(globals, id, status),
        TaskCommands::Delete { id } => run_delete(globals, id),
        TaskCommands::BulkStatus { status, ids } => run_bulk_status(globals, status, ids),
    }
}

pub(crate) fn parse_due_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| Error::InvalidArgument(format!("invalid date '{raw}' (expected YYYY-MM-DD)")))
}

fn emit_event(globals: &Globals, kind: EventKind, task: &Task) -> Result<()> {
    if let Some(mut sink) = globals.event_sink()? {
        sink.emit(&Event::new(kind).with_data(task)?)?;
    }
    Ok(())
}

fn run_add(
    globals: &Globals,
    title: String,
    status: String,
    priority: Option<String>,
    project: Option<String>,
    due: Option<String>,
    parent: Option<String>,
) -> Result<()> {
    let store = globals.open_store()?;
    let draft = TaskDraft {
        title,
        status: Some(TaskStatus::parse(&status)?),
        priority: priority.as_deref().map(Priority::parse).transpose()?,
        project_id: project,
        due_date: due.as_deref().map(parse_due_date).transpose()?,
        parent_task_id: parent,
    };

    let task = store.create_task(draft)?;
    emit_event(globals, EventKind::TaskCreated, &task)?;

    let mut human = HumanOutput::new(format!("Created task {}", task.id));
    human.push_summary("title", task.title.clone());
    human.push_summary("status", task.status.as_str());
    if let Some(project) = &task.project_id {
        human.push_summary("project", project.clone());
    }
    if let Some(due) = &task.due_date {
        human.push_summary("due", due.to_string());
    }

    emit_success(globals.output_options(), "task add", &task, Some(&human))
}

fn run_list(globals: &Globals, status: Option<String>, project: Option<String>) -> Result<()> {
    let store = globals.open_store()?;
    let status = status.as_deref().map(TaskStatus::parse).transpose()?;

    let tasks: Vec<Task> = store
        .load_tasks()?
        .into_iter()
        .filter(|task| status.map(|wanted| task.status == wanted).unwrap_or(true))
        .filter(|task| {
            project
                .as_deref()
                .map(|wanted| task.project_key() == Some(wanted))
                .unwrap_or(true)
        })
        .collect();

    let mut human = HumanOutput::new(format!("{} task(s)", tasks.len()));
    for task in &tasks {
        human.push_detail(format!(
            "{} [{}] {} ({})",
            task.id,
            task.status.as_str(),
            task.title,
            task.priority.as_str()
        ));
    }

    emit_success(globals.output_options(), "task list", &tasks, Some(&human))
}

fn run_move(globals: &Globals, id: String, status: String) -> Result<()> {
    let store = globals.open_store()?;
    let status = TaskStatus::parse(&status)?;
    let task = store.move_task(&id, status)?;
    emit_event(globals, EventKind::TaskMoved, &task)?;

    let mut human = HumanOutput::new(format!("Moved task {}", task.id));
    human.push_summary("status", task.status.as_str());

    emit_success(globals.output_options(), "task move", &task, Some(&human))
}

fn run_delete(globals: &Globals, id: String) -> Result<()> {
    let store = globals.open_store()?;
    let task = store.delete_task(&id)?;
    emit_event(globals, EventKind::TaskDeleted, &task)?;

    let human = HumanOutput::new(format!("Deleted task {}", task.id));
    emit_success(globals.output_options(), "task delete", &task, Some(&human))
}

fn run_bulk_status(globals: &Globals, status: String, ids: Vec<String>) -> Result<()> {
    let store = globals.open_store()?;
    let status = TaskStatus::parse(&status)?;
    let tasks = store.bulk_update_status(&ids, status)?;

    if let Some(mut sink) = globals.event_sink()? {
        sink.emit(&Event::new(EventKind::TasksBulkUpdated).with_data(&tasks)?)?;
    }

    let mut human = HumanOutput::new(format!("Updated {} task(s)", tasks.len()));
    human.push_summary("status", status.as_str());

    emit_success(
        globals.output_options(),
        "task bulk-status",
        &tasks,
        Some(&human),
    )
}
