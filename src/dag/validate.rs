// src/dag/validate.rs

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::dag::TaskGraph;
use crate::errors::{BalanceError, Result};

/// Static checks run before any task is started.
///
/// This checks:
/// - there is at least one task
/// - no task name is declared twice
/// - the requested output task exists
/// - all edges refer to existing tasks, and no task depends on itself
/// - the task graph has no cycles
pub fn validate_graph<V>(graph: &TaskGraph<V>, target: &str) -> Result<()> {
    ensure_has_tasks(graph)?;
    ensure_unique_names(graph)?;
    validate_target(graph, target)?;
    validate_task_dependencies(graph)?;
    validate_dag(graph)?;
    Ok(())
}

fn ensure_has_tasks<V>(graph: &TaskGraph<V>) -> Result<()> {
    if graph.is_empty() {
        return Err(BalanceError::Configuration(
            "task graph must contain at least one task".to_string(),
        ));
    }
    Ok(())
}

fn ensure_unique_names<V>(graph: &TaskGraph<V>) -> Result<()> {
    if let Some(name) = graph.duplicates().first() {
        return Err(BalanceError::Configuration(format!(
            "task '{}' is declared more than once",
            name
        )));
    }
    Ok(())
}

fn validate_target<V>(graph: &TaskGraph<V>, target: &str) -> Result<()> {
    if !graph.contains(target) {
        return Err(BalanceError::Configuration(format!(
            "output task '{}' is not part of the graph",
            target
        )));
    }
    Ok(())
}

fn validate_task_dependencies<V>(graph: &TaskGraph<V>) -> Result<()> {
    for (dep, name) in graph.edges() {
        if !graph.contains(name) {
            return Err(BalanceError::Configuration(format!(
                "dependency declared for unknown task '{}'",
                name
            )));
        }
        if !graph.contains(dep) {
            return Err(BalanceError::Configuration(format!(
                "task '{}' has unknown dependency '{}'",
                name, dep
            )));
        }
        if dep == name {
            return Err(BalanceError::Configuration(format!(
                "task '{}' cannot depend on itself",
                name
            )));
        }
    }
    Ok(())
}

fn validate_dag<V>(graph: &TaskGraph<V>) -> Result<()> {
    // Edge direction: dep -> task.
    let mut dag: DiGraphMap<&str, ()> = DiGraphMap::new();

    for name in graph.tasks() {
        dag.add_node(name);
    }

    for (dep, name) in graph.edges() {
        dag.add_edge(dep, name, ());
    }

    // A topological sort will fail if there is a cycle.
    match toposort(&dag, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => Err(BalanceError::Configuration(format!(
            "cycle detected in task graph involving task '{}'",
            cycle.node_id()
        ))),
    }
}
