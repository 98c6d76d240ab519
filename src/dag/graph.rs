// src/dag/graph.rs

use std::collections::HashMap;

use crate::dag::TaskName;

/// Internal node structure: stores immediate deps and dependents.
#[derive(Debug, Clone, Default)]
struct DagNode {
    /// Direct dependencies: tasks that must be `Done` before this one can run.
    deps: Vec<TaskName>,
    /// Direct dependents: tasks that depend on this one.
    dependents: Vec<TaskName>,
}

/// Lightweight adjacency view of a task graph keyed by task name.
///
/// Acyclicity and name resolution are checked in [`crate::dag::validate`];
/// here we only keep adjacency information (in declaration order) for
/// scheduling and diagnostics.
#[derive(Debug, Clone, Default)]
pub struct DagGraph {
    order: Vec<TaskName>,
    nodes: HashMap<TaskName, DagNode>,
}

impl DagGraph {
    /// Build the adjacency view from task names (declaration order) and
    /// `(dependency, dependent)` edges.
    ///
    /// Edges whose endpoints are unknown are skipped; validation reports them.
    pub fn from_edges<'a>(
        tasks: impl IntoIterator<Item = &'a str>,
        edges: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        let mut order = Vec::new();
        let mut nodes: HashMap<TaskName, DagNode> = HashMap::new();

        for name in tasks {
            if !nodes.contains_key(name) {
                order.push(name.to_string());
                nodes.insert(name.to_string(), DagNode::default());
            }
        }

        for (dep, task) in edges {
            if !nodes.contains_key(dep) || !nodes.contains_key(task) {
                continue;
            }
            if let Some(node) = nodes.get_mut(task) {
                if !node.deps.iter().any(|d| d == dep) {
                    node.deps.push(dep.to_string());
                }
            }
        }

        // Second pass: populate dependents in declaration order so readiness
        // checks after a completion follow the same tie-break order.
        for task_name in order.iter() {
            let deps = nodes
                .get(task_name)
                .map(|n| n.deps.clone())
                .unwrap_or_default();

            for dep in deps {
                if let Some(dep_node) = nodes.get_mut(&dep) {
                    dep_node.dependents.push(task_name.clone());
                }
            }
        }

        Self { order, nodes }
    }

    /// All task names, in declaration order.
    pub fn tasks(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    /// Immediate dependencies of a task.
    pub fn dependencies_of(&self, name: &str) -> &[TaskName] {
        self.nodes
            .get(name)
            .map(|n| n.deps.as_slice())
            .unwrap_or(&[])
    }

    /// Immediate dependents of a task (tasks that list this one as a dependency).
    pub fn dependents_of(&self, name: &str) -> &[TaskName] {
        self.nodes
            .get(name)
            .map(|n| n.dependents.as_slice())
            .unwrap_or(&[])
    }
}
