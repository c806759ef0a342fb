//! kb op / undo command implementations.

use uuid::Uuid;

use crate::cli::{Globals, OpCommands};
use crate::error::{Error, Result};
use crate::events::{Event, EventKind};
use crate::oplog::format_record;
use crate::output::{emit_success, HumanOutput};
use crate::undo::{undo, UndoOptions};

pub fn run(command: OpCommands, globals: &Globals) -> Result<()> {
    match command {
        OpCommands::List { limit } => run_list(globals, limit),
    }
}

fn run_list(globals: &Globals, limit: Option<usize>) -> Result<()> {
    let store = globals.open_store()?;
    let records = store.oplog().read_recent(limit)?;

    let mut human = HumanOutput::new(format!("{} operation(s)", records.len()));
    for record in &records {
        human.push_detail(format_record(record));
    }

    emit_success(globals.output_options(), "op list", &records, Some(&human))
}

pub fn run_undo(op: Option<String>, globals: &Globals) -> Result<()> {
    let op_id = op
        .as_deref()
        .map(|raw| {
            Uuid::parse_str(raw.trim())
                .map_err(|_| Error::InvalidArgument(format!("invalid operation id '{raw}'")))
        })
        .transpose()?;

    let store = globals.open_store()?;
    let summary = undo(&store, UndoOptions { op_id })?;

    if let Some(mut sink) = globals.event_sink()? {
        sink.emit(&Event::new(EventKind::OperationUndone).with_data(&summary)?)?;
    }

    let mut human = HumanOutput::new(format!("Undid operation {}", summary.op_id));
    human.push_summary("command", summary.undone_command.clone());
    if !summary.removed_tasks.is_empty() {
        human.push_summary("removed tasks", summary.removed_tasks.join(", "));
    }
    if !summary.restored_tasks.is_empty() {
        human.push_summary("restored tasks", summary.restored_tasks.join(", "));
    }
    if !summary.removed_projects.is_empty() {
        human.push_summary("removed projects", summary.removed_projects.join(", "));
    }
    if !summary.restored_projects.is_empty() {
        human.push_summary("restored projects", summary.restored_projects.join(", "));
    }

    emit_success(globals.output_options(), "undo", &summary, Some(&human))
}
