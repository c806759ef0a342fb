//! Project visibility resolution.
//!
//! Smart views are about task relevance, so under an active smart view a
//! project is only shown when it has a populated bucket. Without one, the
//! board is structure-driven and shows every project, populated or not.
//! Project scoping uses the hierarchy closure so a parent lane brings its
//! subtree along.

use crate::board::filter::FilterState;
use crate::board::group::{GroupedTasks, UNCATEGORIZED_BUCKET};
use crate::board::hierarchy::descendants_of;
use crate::project::Project;

/// Decide which projects to surface, in display order.
pub fn resolve_projects(
    all_projects: &[Project],
    grouped: &GroupedTasks,
    state: &FilterState,
) -> Vec<Project> {
    if let Some(scoped) = state.scoped_project_id.as_deref() {
        let scope = descendants_of(all_projects, scoped);
        return all_projects
            .iter()
            .filter(|project| scope.contains(&project.id))
            .cloned()
            .collect();
    }

    if state.smart_view.is_active() {
        let visible: Vec<Project> = all_projects
            .iter()
            .filter(|project| grouped.contains_key(&project.id))
            .cloned()
            .collect();
        if visible.is_empty() && grouped.contains_key(UNCATEGORIZED_BUCKET) {
            // Uncategorized tasks still need a lane to render inside.
            return vec![Project::fallback()];
        }
        return visible;
    }

    if all_projects.is_empty() && !grouped.is_empty() {
        return vec![Project::fallback()];
    }

    all_projects.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::filter::SmartView;
    use crate::board::group::group_tasks;
    use crate::project::FALLBACK_PROJECT_ID;
    use crate::task::{Task, TaskStatus};

    fn project(id: &str, parent: Option<&str>) -> Project {
        let mut project = Project::new(id);
        project.id = id.to_string();
        project.parent_id = parent.map(str::to_string);
        project
    }

    fn task(id: &str, project: Option<&str>) -> Task {
        let mut task = Task::new(id, TaskStatus::Planned);
        task.id = id.to_string();
        task.project_id = project.map(str::to_string);
        task
    }

    fn ids(projects: &[Project]) -> Vec<&str> {
        projects.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn default_mode_returns_all_projects_in_store_order() {
        let projects = vec![project("p2", None), project("p1", None)];
        let grouped = group_tasks(&[task("a", Some("p1"))]);
        let resolved = resolve_projects(&projects, &grouped, &FilterState::default());
        assert_eq!(ids(&resolved), vec!["p2", "p1"]);
    }

    #[test]
    fn smart_view_hides_projects_without_matching_tasks() {
        let projects = vec![project("busy", None), project("idle", None)];
        let grouped = group_tasks(&[task("a", Some("busy"))]);
        let state = FilterState {
            smart_view: SmartView::Today,
            ..FilterState::default()
        };
        let resolved = resolve_projects(&projects, &grouped, &state);
        assert_eq!(ids(&resolved), vec!["busy"]);

        // Same data without the smart view: both projects appear.
        let resolved = resolve_projects(&projects, &grouped, &FilterState::default());
        assert_eq!(ids(&resolved), vec!["busy", "idle"]);
    }

    #[test]
    fn smart_view_synthesizes_fallback_for_uncategorized_only() {
        let projects = vec![project("idle", None)];
        let grouped = group_tasks(&[task("a", None)]);
        let state = FilterState {
            smart_view: SmartView::Today,
            ..FilterState::default()
        };
        let resolved = resolve_projects(&projects, &grouped, &state);
        assert_eq!(ids(&resolved), vec![FALLBACK_PROJECT_ID]);
    }

    #[test]
    fn smart_view_with_no_buckets_shows_no_lanes() {
        let projects = vec![project("idle", None)];
        let grouped = GroupedTasks::new();
        let state = FilterState {
            smart_view: SmartView::Today,
            ..FilterState::default()
        };
        assert!(resolve_projects(&projects, &grouped, &state).is_empty());
    }

    #[test]
    fn scoped_project_includes_descendants_in_store_order() {
        let projects = vec![
            project("other", None),
            project("p", None),
            project("c1", Some("p")),
            project("c2", Some("c1")),
        ];
        let state = FilterState {
            scoped_project_id: Some("p".to_string()),
            ..FilterState::default()
        };
        let resolved = resolve_projects(&projects, &GroupedTasks::new(), &state);
        assert_eq!(ids(&resolved), vec!["p", "c1", "c2"]);
    }

    #[test]
    fn scope_takes_precedence_over_smart_view() {
        let projects = vec![project("p", None), project("c", Some("p"))];
        let state = FilterState {
            smart_view: SmartView::Today,
            scoped_project_id: Some("p".to_string()),
            ..FilterState::default()
        };
        let resolved = resolve_projects(&projects, &GroupedTasks::new(), &state);
        assert_eq!(ids(&resolved), vec!["p", "c"]);
    }

    #[test]
    fn empty_store_with_uncategorized_tasks_gets_a_fallback_lane() {
        let grouped = group_tasks(&[task("a", None)]);
        let resolved = resolve_projects(&[], &grouped, &FilterState::default());
        assert_eq!(ids(&resolved), vec![FALLBACK_PROJECT_ID]);
    }

    #[test]
    fn empty_store_with_no_tasks_stays_empty() {
        let resolved = resolve_projects(&[], &GroupedTasks::new(), &FilterState::default());
        assert!(resolved.is_empty());
    }
}
