use super::GraphError;
use crate::task::Task;
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// Validated dependency graph over an exclusively-owned task set.
///
/// Insertion order is preserved and used for stable tie-breaks in the
/// topological order.
#[derive(Debug, Clone)]
pub struct TaskGraph {
    tasks: Vec<Task>,
    index_of: HashMap<String, usize>,
    graph: DiGraph<usize, ()>,
    nodes: Vec<NodeIndex>,
    topo: Vec<usize>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    Visiting,
    Visited,
}

impl TaskGraph {
    /// Build and validate the graph. Checks run in a fixed order: duplicate
    /// ids, then unknown dependency ids, then cycles.
    pub fn build(tasks: Vec<Task>) -> Result<Self, GraphError> {
        let mut index_of: HashMap<String, usize> = HashMap::with_capacity(tasks.len());
        for (idx, task) in tasks.iter().enumerate() {
            if index_of.insert(task.id.clone(), idx).is_some() {
                return Err(GraphError::DuplicateTask(task.id.clone()));
            }
        }

        for task in &tasks {
            for dep in &task.dependencies {
                if !index_of.contains_key(dep) {
                    return Err(GraphError::UnknownDependency {
                        task: task.id.clone(),
                        dependency: dep.clone(),
                    });
                }
            }
        }

        // Node weight is the insertion index; edges run dependency -> dependent.
        let mut graph: DiGraph<usize, ()> = DiGraph::new();
        let nodes: Vec<NodeIndex> = (0..tasks.len()).map(|idx| graph.add_node(idx)).collect();
        for (idx, task) in tasks.iter().enumerate() {
            for dep in &task.dependencies {
                let dep_idx = index_of[dep.as_str()];
                graph.add_edge(nodes[dep_idx], nodes[idx], ());
            }
        }

        let built = Self {
            tasks,
            index_of,
            graph,
            nodes,
            topo: Vec::new(),
        };
        built.detect_cycle()?;

        let topo = built.compute_topological_order();
        Ok(Self { topo, ..built })
    }

    /// Depth-first cycle check with visiting/visited marks. A back-edge to a
    /// node still on the stack yields the cycle path.
    fn detect_cycle(&self) -> Result<(), GraphError> {
        let mut marks = vec![Mark::Unvisited; self.tasks.len()];
        let mut stack: Vec<String> = Vec::new();

        for start in 0..self.tasks.len() {
            if marks[start] == Mark::Unvisited {
                self.visit(start, &mut marks, &mut stack)?;
            }
        }
        Ok(())
    }

    fn visit(
        &self,
        idx: usize,
        marks: &mut [Mark],
        stack: &mut Vec<String>,
    ) -> Result<(), GraphError> {
        marks[idx] = Mark::Visiting;
        stack.push(self.tasks[idx].id.clone());

        // Walk dependencies in their declared order so the reported path is
        // deterministic.
        for dep in &self.tasks[idx].dependencies {
            let dep_idx = self.index_of[dep.as_str()];
            match marks[dep_idx] {
                Mark::Visiting => {
                    let cycle_start = stack
                        .iter()
                        .position(|id| id == dep)
                        .unwrap_or(0);
                    let mut path: Vec<String> = stack[cycle_start..].to_vec();
                    path.push(dep.clone());
                    return Err(GraphError::CyclicDependency(path));
                }
                Mark::Unvisited => self.visit(dep_idx, marks, stack)?,
                Mark::Visited => {}
            }
        }

        stack.pop();
        marks[idx] = Mark::Visited;
        Ok(())
    }

    /// Kahn's algorithm, draining the ready set in insertion order, so the
    /// result is deterministic and every task follows all its dependencies.
    fn compute_topological_order(&self) -> Vec<usize> {
        let mut in_degree: Vec<usize> = self
            .nodes
            .iter()
            .map(|&node| {
                self.graph
                    .neighbors_directed(node, Direction::Incoming)
                    .count()
            })
            .collect();

        let mut ready: Vec<usize> = (0..self.tasks.len())
            .filter(|&idx| in_degree[idx] == 0)
            .collect();
        let mut order = Vec::with_capacity(self.tasks.len());

        while let Some(&idx) = ready.first() {
            ready.remove(0);
            order.push(idx);
            for neighbor in self
                .graph
                .neighbors_directed(self.nodes[idx], Direction::Outgoing)
            {
                let succ = self.graph[neighbor];
                in_degree[succ] -= 1;
                if in_degree[succ] == 0 {
                    // Keep the ready set sorted by insertion index.
                    let pos = ready.partition_point(|&existing| existing < succ);
                    ready.insert(pos, succ);
                }
            }
        }

        order
    }

    /// Tasks in topological order: each strictly after all its dependencies,
    /// ties broken by insertion order.
    pub fn topological_order(&self) -> Vec<&Task> {
        self.topo.iter().map(|&idx| &self.tasks[idx]).collect()
    }

    /// Tasks in original insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.index_of.get(id).map(|&idx| &self.tasks[idx])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index_of.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn dependencies_of(&self, id: &str) -> Option<&[String]> {
        self.get(id).map(|task| task.dependencies.as_slice())
    }

    /// Ids of tasks that depend on `id`, in insertion order.
    pub fn dependents_of(&self, id: &str) -> Vec<&str> {
        let Some(&idx) = self.index_of.get(id) else {
            return Vec::new();
        };
        let mut dependents: Vec<usize> = self
            .graph
            .neighbors_directed(self.nodes[idx], Direction::Outgoing)
            .map(|node| self.graph[node])
            .collect();
        dependents.sort_unstable();
        dependents
            .into_iter()
            .map(|dep_idx| self.tasks[dep_idx].id.as_str())
            .collect()
    }

    /// Consume the graph and hand the task set back to the caller.
    pub fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }
}
