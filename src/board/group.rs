//! Grouping filtered tasks into per-project buckets.

use std::collections::BTreeMap;

use crate::task::Task;

/// Reserved bucket key for tasks without a project.
pub const UNCATEGORIZED_BUCKET: &str = "uncategorized";

/// Tasks partitioned by owning project.
///
/// A `BTreeMap` keeps bucket iteration deterministic; order inside a
/// bucket is the input order. Buckets are created lazily, so a project
/// with zero tasks has no entry here.
pub type GroupedTasks = BTreeMap<String, Vec<Task>>;

/// Partition tasks into buckets keyed by project id, with the reserved
/// `uncategorized` bucket for tasks that have none. Every input task lands
/// in exactly one bucket.
pub fn group_tasks(tasks: &[Task]) -> GroupedTasks {
    let mut grouped = GroupedTasks::new();
    for task in tasks {
        let key = task.project_key().unwrap_or(UNCATEGORIZED_BUCKET);
        grouped
            .entry(key.to_string())
            .or_default()
            .push(task.clone());
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskStatus;

    fn task(id: &str, project: Option<&str>) -> Task {
        let mut task = Task::new(id, TaskStatus::Planned);
        task.id = id.to_string();
        task.project_id = project.map(str::to_string);
        task
    }

    #[test]
    fn every_task_lands_in_exactly_one_bucket() {
        let tasks = vec![
            task("a", Some("p1")),
            task("b", None),
            task("c", Some("p2")),
            task("d", Some("p1")),
        ];
        let grouped = group_tasks(&tasks);

        let total: usize = grouped.values().map(Vec::len).sum();
        assert_eq!(total, tasks.len());
        for original in &tasks {
            let hits = grouped
                .values()
                .flatten()
                .filter(|t| t.id == original.id)
                .count();
            assert_eq!(hits, 1, "task {} must appear exactly once", original.id);
        }
    }

    #[test]
    fn bucket_order_matches_input_order() {
        let tasks = vec![
            task("first", Some("p1")),
            task("second", Some("p1")),
            task("third", Some("p1")),
        ];
        let grouped = group_tasks(&tasks);
        let ids: Vec<&str> = grouped["p1"].iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn missing_and_blank_project_ids_go_to_uncategorized() {
        let tasks = vec![task("a", None), task("b", Some("")), task("c", Some("  "))];
        let grouped = group_tasks(&tasks);
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[UNCATEGORIZED_BUCKET].len(), 3);
    }

    #[test]
    fn no_bucket_for_projects_without_tasks() {
        let grouped = group_tasks(&[task("a", Some("p1"))]);
        assert_eq!(grouped.keys().collect::<Vec<_>>(), vec!["p1"]);
    }

    #[test]
    fn empty_input_yields_no_buckets() {
        assert!(group_tasks(&[]).is_empty());
    }
}
