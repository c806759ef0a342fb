//! The board engine: a pure function from (tasks, projects, filter state)
//! to the swimlane view model.
//!
//! Pipeline: filter chain → task grouper → project visibility resolver
//! (consulting the hierarchy resolver when a project scope is set) →
//! assembler. Every call recomputes from scratch; no state survives
//! between invocations, so the output is always consistent with whatever
//! mutation just happened.

pub mod filter;
pub mod group;
pub mod hierarchy;
pub mod visibility;

use serde::Serialize;

use crate::project::Project;
use crate::settings::BoardSettings;
use crate::task::Task;

pub use filter::{apply_filters, FilterContext, FilterState, SmartView, SmartViewSet};
pub use group::{group_tasks, GroupedTasks, UNCATEGORIZED_BUCKET};
pub use hierarchy::descendants_of;
pub use visibility::resolve_projects;

/// One swimlane: a visible project and its tasks in filtered order.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Swimlane {
    pub project: Project,
    pub tasks: Vec<Task>,
}

/// The engine's sole output artifact.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BoardView {
    pub lanes: Vec<Swimlane>,
    /// Tasks attached to displayed lanes only; hidden buckets never
    /// inflate this.
    pub displayed_count: usize,
    pub settings: BoardSettings,
}

/// Pair each visible project with its bucket, in resolver order.
pub fn assemble(
    projects: Vec<Project>,
    grouped: &GroupedTasks,
    settings: BoardSettings,
) -> BoardView {
    let lanes: Vec<Swimlane> = projects
        .into_iter()
        .map(|project| {
            let tasks = grouped.get(&project.id).cloned().unwrap_or_default();
            Swimlane { project, tasks }
        })
        .collect();
    let displayed_count = lanes.iter().map(|lane| lane.tasks.len()).sum();

    BoardView {
        lanes,
        displayed_count,
        settings,
    }
}

/// Run the full pipeline.
pub fn build_board(
    tasks: &[Task],
    projects: &[Project],
    state: &FilterState,
    ctx: &FilterContext,
    settings: BoardSettings,
) -> BoardView {
    let filtered = apply_filters(tasks, state, ctx);
    let grouped = group_tasks(&filtered);
    let visible = resolve_projects(projects, &grouped, state);
    assemble(visible, &grouped, settings)
}
