use std::fmt;

mod task_graph;

pub use task_graph::TaskGraph;

/// Referential failures detected while building the dependency graph, in the
/// order they are checked: duplicates, unknown ids, cycles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    DuplicateTask(String),
    UnknownDependency { task: String, dependency: String },
    /// The cycle path, first id repeated at the end.
    CyclicDependency(Vec<String>),
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphError::DuplicateTask(id) => write!(f, "duplicate task id '{id}'"),
            GraphError::UnknownDependency { task, dependency } => write!(
                f,
                "task '{task}' depends on unknown task id '{dependency}'"
            ),
            GraphError::CyclicDependency(path) => {
                write!(f, "dependency cycle: {}", path.join(" -> "))
            }
        }
    }
}

impl std::error::Error for GraphError {}
