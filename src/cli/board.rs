//! kb board command: run the engine and print the swimlanes.

use chrono::{Local, NaiveDate};

use crate::board::{build_board, BoardView, FilterContext, FilterState, SmartView, SmartViewSet};
use crate::cli::task::parse_due_date;
use crate::cli::Globals;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput};
use crate::settings::BoardSettings;
use crate::task::{Task, TaskStatus};

pub struct BoardOptions {
    pub view: String,
    pub status: Option<String>,
    pub hide_done: bool,
    pub project: Option<String>,
    pub today: Option<String>,
}

/// Custom smart views available from the CLI. The engine only knows
/// "today" built-in; these are the injected predicates.
fn smart_views() -> SmartViewSet {
    let mut views = SmartViewSet::new();
    views.register("overdue", |task: &Task, today: NaiveDate| {
        task.due_date.map(|due| due < today).unwrap_or(false)
    });
    views
}

pub fn run(options: BoardOptions, globals: &Globals) -> Result<()> {
    let store = globals.open_store()?;
    let tasks = store.load_tasks()?;
    let projects = store.load_projects()?;
    let settings = BoardSettings::load(&store.storage().settings_file())?;

    let state = FilterState {
        smart_view: SmartView::parse(&options.view),
        status_filter: options
            .status
            .as_deref()
            .map(TaskStatus::parse)
            .transpose()?,
        hide_done: options.hide_done,
        scoped_project_id: options.project,
    };

    let today = match options.today.as_deref() {
        Some(raw) => parse_due_date(raw)?,
        None => Local::now().date_naive(),
    };
    let views = smart_views();
    let ctx = FilterContext {
        today,
        smart_views: &views,
    };

    let board = build_board(&tasks, &projects, &state, &ctx, settings);
    let human = render(&board);

    emit_success(globals.output_options(), "board", &board, Some(&human))
}

fn render(board: &BoardView) -> HumanOutput {
    let mut human = HumanOutput::new(format!(
        "Board: {} task(s) shown, {} lane(s)",
        board.displayed_count,
        board.lanes.len()
    ));
    human.push_summary("density", board.settings.density.as_str());

    for lane in &board.lanes {
        human.push_detail(format!("== {} ==", lane.project.name));
        if lane.tasks.is_empty() {
            human.push_detail("   (no tasks)".to_string());
            continue;
        }
        for task in &lane.tasks {
            if !board.settings.show_done_column && task.status == TaskStatus::Done {
                continue;
            }
            let due = task
                .due_date
                .map(|d| format!(" due {d}"))
                .unwrap_or_default();
            human.push_detail(format!(
                "   [{}] {} ({}){}",
                task.status.as_str(),
                task.title,
                task.id,
                due
            ));
        }
    }

    human
}
