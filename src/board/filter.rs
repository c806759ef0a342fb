//! Staged task filtering.
//!
//! Filtering runs three stages in a fixed order: smart view, status,
//! hide-done. Each stage is a pure predicate; the chain is built as an
//! ordered list so a new axis can be inserted without reordering the
//! existing ones. The engine never reads the clock: the reference day for
//! "today" comes in through the [`FilterContext`].

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::task::{Task, TaskStatus};

/// A named, built-in task-relevance filter, distinct from the manual
/// status and project filters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SmartView {
    /// The "all" sentinel: no smart view active.
    #[default]
    All,
    /// Tasks due on the reference day.
    Today,
    /// A caller-registered view; semantics live in the injected predicate.
    Custom(String),
}

impl SmartView {
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "" | "all" | "none" => SmartView::All,
            "today" => SmartView::Today,
            _ => SmartView::Custom(trimmed.to_string()),
        }
    }

    /// Whether a smart view is active (anything but the "all" sentinel).
    pub fn is_active(&self) -> bool {
        !matches!(self, SmartView::All)
    }
}

/// The transient filter axes the board is a pure function of.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    pub smart_view: SmartView,
    pub status_filter: Option<TaskStatus>,
    pub hide_done: bool,
    pub scoped_project_id: Option<String>,
}

/// Injected predicate for a custom smart view. Receives the reference day
/// so date-relative views stay pure.
pub type SmartViewPredicate = Box<dyn Fn(&Task, NaiveDate) -> bool>;

/// Registry of custom smart views. The engine knows only "today";
/// everything else is delegated here by name.
#[derive(Default)]
pub struct SmartViewSet {
    views: HashMap<String, SmartViewPredicate>,
}

impl SmartViewSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        name: impl Into<String>,
        predicate: impl Fn(&Task, NaiveDate) -> bool + 'static,
    ) {
        self.views.insert(name.into(), Box::new(predicate));
    }

    fn get(&self, name: &str) -> Option<&SmartViewPredicate> {
        self.views.get(name)
    }
}

/// Read-only inputs the filter stages need beyond the filter state.
pub struct FilterContext<'a> {
    pub today: NaiveDate,
    pub smart_views: &'a SmartViewSet,
}

type Stage<'a> = Box<dyn Fn(&Task) -> bool + 'a>;

fn build_stages<'a>(state: &'a FilterState, ctx: &'a FilterContext<'a>) -> Vec<Stage<'a>> {
    let mut stages: Vec<Stage<'a>> = Vec::new();

    match &state.smart_view {
        SmartView::All => {}
        SmartView::Today => {
            let day = ctx.today;
            stages.push(Box::new(move |task| task.due_on(day)));
        }
        SmartView::Custom(name) => match ctx.smart_views.get(name) {
            Some(predicate) => {
                let day = ctx.today;
                stages.push(Box::new(move |task| predicate(task, day)));
            }
            None => {
                // Unknown relevance test: nothing can claim relevance.
                tracing::warn!(view = %name, "unknown smart view, matching nothing");
                stages.push(Box::new(|_| false));
            }
        },
    }

    if let Some(status) = state.status_filter {
        stages.push(Box::new(move |task| task.status == status));
    }

    // An explicit status filter on done overrides hide-done.
    if state.hide_done && state.status_filter != Some(TaskStatus::Done) {
        stages.push(Box::new(|task| task.status != TaskStatus::Done));
    }

    stages
}

/// Apply the filter chain, returning an order-preserving subsequence.
pub fn apply_filters(tasks: &[Task], state: &FilterState, ctx: &FilterContext) -> Vec<Task> {
    let stages = build_stages(state, ctx);
    tasks
        .iter()
        .filter(|task| stages.iter().all(|stage| stage(task)))
        .cloned()
        .collect()
}
