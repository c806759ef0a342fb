//! kb settings command implementations.

use crate::cli::{Globals, SettingsCommands};
use crate::error::{Error, Result};
use crate::events::{Event, EventBus, EventKind};
use crate::output::{emit_success, HumanOutput};
use crate::settings::{BoardSettings, Density};
use crate::storage::Storage;

pub fn run(command: SettingsCommands, globals: &Globals) -> Result<()> {
    match command {
        SettingsCommands::Show => run_show(globals),
        SettingsCommands::Set {
            density,
            show_done_column,
        } => run_set(globals, density, show_done_column),
    }
}

fn settings_path(globals: &Globals) -> Result<(Storage, std::path::PathBuf)> {
    let storage = Storage::resolve(globals.dir.clone())?;
    let path = storage.settings_file();
    Ok((storage, path))
}

fn run_show(globals: &Globals) -> Result<()> {
    let (_storage, path) = settings_path(globals)?;
    let settings = BoardSettings::load(&path)?;

    let mut human = HumanOutput::new("Board settings");
    human.push_summary("density", settings.density.as_str());
    human.push_summary("show_done_column", settings.show_done_column.to_string());

    emit_success(
        globals.output_options(),
        "settings show",
        &settings,
        Some(&human),
    )
}

fn run_set(
    globals: &Globals,
    density: Option<String>,
    show_done_column: Option<bool>,
) -> Result<()> {
    if density.is_none() && show_done_column.is_none() {
        return Err(Error::InvalidArgument(
            "nothing to change: pass --density and/or --show-done-column".to_string(),
        ));
    }

    let (storage, path) = settings_path(globals)?;
    storage.init()?;
    let mut settings = BoardSettings::load(&path)?;

    if let Some(raw) = density {
        settings.density = Density::parse(&raw)?;
    }
    if let Some(value) = show_done_column {
        settings.show_done_column = value;
    }
    settings.save(&path)?;

    // Other in-process views hear about the change through the bus; the
    // sink carries it to external subscribers.
    let mut bus = EventBus::new();
    bus.subscribe(|event: &Event| {
        tracing::info!(event = ?event.event, "settings changed");
    });
    bus.publish(&Event::new(EventKind::SettingsChanged).with_data(settings)?);

    if let Some(mut sink) = globals.event_sink()? {
        sink.emit(&Event::new(EventKind::SettingsChanged).with_data(settings)?)?;
    }

    let mut human = HumanOutput::new("Updated settings");
    human.push_summary("density", settings.density.as_str());
    human.push_summary("show_done_column", settings.show_done_column.to_string());

    emit_success(
        globals.output_options(),
        "settings set",
        &settings,
        Some(&human),
    )
}
