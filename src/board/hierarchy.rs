//! Project hierarchy resolution.
//!
//! Projects point at their parent; the board needs the opposite closure:
//! a project together with every transitive descendant. The traversal is
//! an explicit frontier with a visited set so a corrupt store containing a
//! parent cycle still terminates.

use std::collections::{HashMap, HashSet};

use crate::project::Project;

/// Ids of `project_id` and all of its transitive descendants.
///
/// Always includes `project_id` itself, even when no such project exists
/// in `projects` (a scoped filter on an unknown id yields a closure of
/// one, and the visibility resolver then surfaces no lanes).
pub fn descendants_of(projects: &[Project], project_id: &str) -> HashSet<String> {
    let mut children_by_parent: HashMap<&str, Vec<&str>> = HashMap::new();
    for project in projects {
        if let Some(parent) = project.parent_id.as_deref() {
            children_by_parent
                .entry(parent)
                .or_default()
                .push(project.id.as_str());
        }
    }

    let mut visited: HashSet<String> = HashSet::new();
    let mut frontier: Vec<&str> = vec![project_id];

    while let Some(current) = frontier.pop() {
        if !visited.insert(current.to_string()) {
            continue;
        }
        if let Some(children) = children_by_parent.get(current) {
            for child in children {
                if !visited.contains(*child) {
                    frontier.push(child);
                }
            }
        }
    }

    visited
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(id: &str, parent: Option<&str>) -> Project {
        let mut project = Project::new(id);
        project.id = id.to_string();
        project.parent_id = parent.map(str::to_string);
        project
    }

    #[test]
    fn closure_includes_self() {
        let projects = vec![project("p1", None)];
        let ids = descendants_of(&projects, "p1");
        assert_eq!(ids, HashSet::from(["p1".to_string()]));
    }

    #[test]
    fn closure_follows_chains() {
        let projects = vec![
            project("p", None),
            project("c1", Some("p")),
            project("c2", Some("c1")),
            project("other", None),
        ];
        let ids = descendants_of(&projects, "p");
        assert_eq!(
            ids,
            HashSet::from(["p".to_string(), "c1".to_string(), "c2".to_string()])
        );
    }

    #[test]
    fn closure_covers_sibling_branches() {
        let projects = vec![
            project("root", None),
            project("a", Some("root")),
            project("b", Some("root")),
            project("a1", Some("a")),
        ];
        let ids = descendants_of(&projects, "root");
        assert_eq!(ids.len(), 4);
        assert!(ids.contains("a1"));
        assert!(ids.contains("b"));
    }

    #[test]
    fn cyclic_parents_still_terminate() {
        // x -> y -> x: malformed, but the visited set refuses revisits.
        let projects = vec![project("x", Some("y")), project("y", Some("x"))];
        let ids = descendants_of(&projects, "x");
        assert_eq!(ids, HashSet::from(["x".to_string(), "y".to_string()]));
    }

    #[test]
    fn unknown_id_yields_a_closure_of_one() {
        let projects = vec![project("p1", None)];
        let ids = descendants_of(&projects, "ghost");
        assert_eq!(ids, HashSet::from(["ghost".to_string()]));
    }
}
