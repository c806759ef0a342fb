//! kb project command implementations.

use crate::cli::{Globals, ProjectCommands};
use crate::error::Result;
use crate::events::{Event, EventKind};
use crate::output::{emit_success, HumanOutput};

pub fn run(command: ProjectCommands, globals: &Globals) -> Result<()> {
    match command {
        ProjectCommands::Add {
            name,
            parent,
            color,
        } => run_add(globals, name, parent, color),
        ProjectCommands::List => run_list(globals),
    }
}

fn run_add(
    globals: &Globals,
    name: String,
    parent: Option<String>,
    color: Option<String>,
) -> Result<()> {
    let store = globals.open_store()?;
    let project = store.create_project(&name, parent, color)?;

    if let Some(mut sink) = globals.event_sink()? {
        sink.emit(&Event::new(EventKind::ProjectCreated).with_data(&project)?)?;
    }

    let mut human = HumanOutput::new(format!("Created project {}", project.id));
    human.push_summary("name", project.name.clone());
    if let Some(parent) = &project.parent_id {
        human.push_summary("parent", parent.clone());
    }

    emit_success(
        globals.output_options(),
        "project add",
        &project,
        Some(&human),
    )
}

fn run_list(globals: &Globals) -> Result<()> {
    let store = globals.open_store()?;
    let projects = store.load_projects()?;

    let mut human = HumanOutput::new(format!("{} project(s)", projects.len()));
    for project in &projects {
        match &project.parent_id {
            Some(parent) => {
                human.push_detail(format!("{} {} (parent: {})", project.id, project.name, parent))
            }
            None => human.push_detail(format!("{} {}", project.id, project.name)),
        }
    }

    emit_success(
        globals.output_options(),
        "project list",
        &projects,
        Some(&human),
    )
}
