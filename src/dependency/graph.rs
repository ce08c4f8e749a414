//! Task dependency graph.
//!
//! Nodes are tasks, indexed in input order. An edge `t -> d` means task `t`
//! waits on task `d`. Construction rejects unknown references and cycles, so
//! every built graph is a DAG.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Topological Sort)
//! Kahn (1962), "Topological sorting of large networks"

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::GraphError;
use crate::models::{Task, TaskStatus};

/// Which signal decides that a dependency is done.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadinessMode {
    /// Dependency status must be `completed`.
    #[default]
    Status,
    /// Dependency progress must be at least 100.
    Progress,
}

#[derive(Debug, Clone)]
struct Node {
    id: String,
    status: TaskStatus,
    progress: i32,
    /// Indices of the tasks this one waits on.
    dependencies: Vec<usize>,
    /// Indices of the tasks waiting on this one.
    dependents: Vec<usize>,
}

impl Node {
    fn is_done(&self, mode: ReadinessMode) -> bool {
        match mode {
            ReadinessMode::Status => self.status == TaskStatus::Completed,
            ReadinessMode::Progress => self.progress >= 100,
        }
    }
}

/// Validated dependency relation over one project's tasks.
///
/// # Example
/// ```
/// use project_timeline::dependency::{DependencyGraph, ReadinessMode};
/// use project_timeline::models::{Task, TaskStatus};
///
/// let tasks = vec![
///     Task::new("A").with_status(TaskStatus::Completed),
///     Task::new("B").with_dependency("A"),
/// ];
/// let graph = DependencyGraph::build(&tasks).unwrap();
/// assert!(graph.is_startable("B", ReadinessMode::Status).unwrap());
/// assert_eq!(graph.topological_order().unwrap(), vec!["A", "B"]);
/// ```
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    nodes: Vec<Node>,
    index: HashMap<String, usize>,
}

impl DependencyGraph {
    /// Builds and validates the graph.
    ///
    /// # Checks (in order)
    /// 1. No duplicate task IDs
    /// 2. Every dependency ID names a task in the list
    /// 3. No task depends on itself (reported as a one-node cycle)
    /// 4. No cycles (DFS with a recursion stack)
    pub fn build(tasks: &[Task]) -> Result<Self, GraphError> {
        let mut index = HashMap::with_capacity(tasks.len());
        for (i, task) in tasks.iter().enumerate() {
            if index.insert(task.id.clone(), i).is_some() {
                tracing::debug!(task_id = %task.id, "duplicate task id");
                return Err(GraphError::DuplicateTask(task.id.clone()));
            }
        }

        let mut nodes: Vec<Node> = tasks
            .iter()
            .map(|t| Node {
                id: t.id.clone(),
                status: t.status,
                progress: t.progress,
                dependencies: Vec::with_capacity(t.dependencies.len()),
                dependents: Vec::new(),
            })
            .collect();

        for (i, task) in tasks.iter().enumerate() {
            let mut seen = HashSet::new();
            for dep in &task.dependencies {
                let Some(&d) = index.get(dep) else {
                    tracing::debug!(task_id = %task.id, missing_id = %dep, "unknown dependency");
                    return Err(GraphError::UnknownDependency {
                        task_id: task.id.clone(),
                        missing_id: dep.clone(),
                    });
                };
                if d == i {
                    tracing::debug!(task_id = %task.id, "self dependency");
                    return Err(GraphError::Cycle(vec![task.id.clone()]));
                }
                if seen.insert(d) {
                    nodes[i].dependencies.push(d);
                    nodes[d].dependents.push(i);
                }
            }
        }

        let graph = Self { nodes, index };
        if let Some(cycle) = graph.find_cycle() {
            tracing::debug!(cycle = ?cycle, "dependency cycle");
            return Err(GraphError::Cycle(cycle));
        }
        Ok(graph)
    }

    /// Number of tasks.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no tasks.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `task_id` may start: every dependency is done under `mode`.
    ///
    /// A task without dependencies is always startable.
    pub fn is_startable(&self, task_id: &str, mode: ReadinessMode) -> Result<bool, GraphError> {
        let node = &self.nodes[self.position(task_id)?];
        Ok(node
            .dependencies
            .iter()
            .all(|&d| self.nodes[d].is_done(mode)))
    }

    /// Tasks not yet done whose dependencies are all done, in input order.
    pub fn startable_tasks(&self, mode: ReadinessMode) -> Vec<&str> {
        self.nodes
            .iter()
            .filter(|n| !n.is_done(mode))
            .filter(|n| n.dependencies.iter().all(|&d| self.nodes[d].is_done(mode)))
            .map(|n| n.id.as_str())
            .collect()
    }

    /// Direct dependencies of `task_id`, in declaration order.
    pub fn dependencies_of(&self, task_id: &str) -> Result<Vec<&str>, GraphError> {
        let node = &self.nodes[self.position(task_id)?];
        Ok(node.dependencies.iter().map(|&d| self.nodes[d].id.as_str()).collect())
    }

    /// Tasks that directly wait on `task_id`, in input order.
    pub fn dependents_of(&self, task_id: &str) -> Result<Vec<&str>, GraphError> {
        let node = &self.nodes[self.position(task_id)?];
        Ok(node.dependents.iter().map(|&d| self.nodes[d].id.as_str()).collect())
    }

    /// Updates the status snapshot of a task.
    pub fn set_status(&mut self, task_id: &str, status: TaskStatus) -> Result<(), GraphError> {
        let i = self.position(task_id)?;
        self.nodes[i].status = status;
        Ok(())
    }

    /// Updates the progress snapshot of a task.
    pub fn set_progress(&mut self, task_id: &str, progress: i32) -> Result<(), GraphError> {
        let i = self.position(task_id)?;
        self.nodes[i].progress = progress;
        Ok(())
    }

    /// Orders task IDs so every dependency precedes its dependents.
    ///
    /// # Algorithm
    /// Kahn's algorithm. Among the tasks ready at any point, the one earliest
    /// in the input list goes first, so the result is stable.
    ///
    /// # Errors
    /// [`GraphError::Cycle`] with the unordered remainder if no order exists.
    pub fn topological_order(&self) -> Result<Vec<&str>, GraphError> {
        let mut in_degree: Vec<usize> = self.nodes.iter().map(|n| n.dependencies.len()).collect();
        let mut ready: BinaryHeap<Reverse<usize>> = (0..self.nodes.len())
            .filter(|&i| in_degree[i] == 0)
            .map(Reverse)
            .collect();
        let mut order = Vec::with_capacity(self.nodes.len());

        while let Some(Reverse(i)) = ready.pop() {
            order.push(i);
            for &dependent in &self.nodes[i].dependents {
                in_degree[dependent] -= 1;
                if in_degree[dependent] == 0 {
                    ready.push(Reverse(dependent));
                }
            }
        }

        if order.len() < self.nodes.len() {
            let remaining = (0..self.nodes.len())
                .filter(|&i| in_degree[i] > 0)
                .map(|i| self.nodes[i].id.clone())
                .collect();
            return Err(GraphError::Cycle(remaining));
        }

        Ok(order.into_iter().map(|i| self.nodes[i].id.as_str()).collect())
    }

    fn position(&self, task_id: &str) -> Result<usize, GraphError> {
        self.index
            .get(task_id)
            .copied()
            .ok_or_else(|| GraphError::UnknownTask(task_id.to_string()))
    }

    /// Returns the IDs along the first cycle found, in traversal order.
    ///
    /// Iterative DFS: each frame is `(node, next dependency index)`, so long
    /// chains do not grow the call stack.
    fn find_cycle(&self) -> Option<Vec<String>> {
        let mut visited = vec![false; self.nodes.len()];
        let mut on_stack = vec![false; self.nodes.len()];
        let mut frames: Vec<(usize, usize)> = Vec::new();

        for start in 0..self.nodes.len() {
            if visited[start] {
                continue;
            }
            visited[start] = true;
            on_stack[start] = true;
            frames.push((start, 0));

            while let Some(frame) = frames.last_mut() {
                let (node, next_dep) = *frame;
                let Some(&next) = self.nodes[node].dependencies.get(next_dep) else {
                    frames.pop();
                    on_stack[node] = false;
                    continue;
                };
                frame.1 += 1;

                if on_stack[next] {
                    // Back edge: the cycle is the stack from `next` upward.
                    let from = frames.iter().position(|&(n, _)| n == next).unwrap_or(0);
                    return Some(
                        frames[from..]
                            .iter()
                            .map(|&(n, _)| self.nodes[n].id.clone())
                            .collect(),
                    );
                }
                if !visited[next] {
                    visited[next] = true;
                    on_stack[next] = true;
                    frames.push((next, 0));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> Vec<Task> {
        vec![
            Task::new("A"),
            Task::new("B").with_dependency("A"),
            Task::new("C").with_dependency("A").with_dependency("B"),
        ]
    }

    fn position_of(order: &[&str], id: &str) -> usize {
        order.iter().position(|&x| x == id).unwrap()
    }

    #[test]
    fn test_build_valid() {
        let graph = DependencyGraph::build(&chain()).unwrap();
        assert_eq!(graph.len(), 3);
        assert!(!graph.is_empty());
        assert_eq!(graph.dependencies_of("C").unwrap(), vec!["A", "B"]);
        assert_eq!(graph.dependents_of("A").unwrap(), vec!["B", "C"]);
    }

    #[test]
    fn test_two_node_cycle() {
        let tasks = vec![
            Task::new("A").with_dependency("B"),
            Task::new("B").with_dependency("A"),
        ];
        match DependencyGraph::build(&tasks) {
            Err(GraphError::Cycle(ids)) => {
                assert_eq!(ids.len(), 2);
                assert!(ids.contains(&"A".to_string()));
                assert!(ids.contains(&"B".to_string()));
            }
            other => panic!("expected cycle, got {other:?}"),
        }
    }

    #[test]
    fn test_long_cycle_reports_members_only() {
        // S -> X -> Y -> Z -> X
        let tasks = vec![
            Task::new("S").with_dependency("X"),
            Task::new("X").with_dependency("Y"),
            Task::new("Y").with_dependency("Z"),
            Task::new("Z").with_dependency("X"),
        ];
        let Err(GraphError::Cycle(ids)) = DependencyGraph::build(&tasks) else {
            panic!("expected cycle");
        };
        assert_eq!(ids, vec!["X", "Y", "Z"]);
    }

    #[test]
    fn test_self_dependency() {
        let tasks = vec![Task::new("A").with_dependency("A")];
        assert_eq!(
            DependencyGraph::build(&tasks).unwrap_err(),
            GraphError::Cycle(vec!["A".into()])
        );
    }

    #[test]
    fn test_unknown_dependency() {
        let tasks = vec![Task::new("A"), Task::new("B").with_dependency("zzz")];
        assert_eq!(
            DependencyGraph::build(&tasks).unwrap_err(),
            GraphError::UnknownDependency {
                task_id: "B".into(),
                missing_id: "zzz".into()
            }
        );
    }

    #[test]
    fn test_duplicate_task() {
        let tasks = vec![Task::new("A"), Task::new("A")];
        assert_eq!(
            DependencyGraph::build(&tasks).unwrap_err(),
            GraphError::DuplicateTask("A".into())
        );
    }

    #[test]
    fn test_repeated_dependency_counted_once() {
        let tasks = vec![
            Task::new("A"),
            Task::new("B").with_dependency("A").with_dependency("A"),
        ];
        let graph = DependencyGraph::build(&tasks).unwrap();
        assert_eq!(graph.dependencies_of("B").unwrap(), vec!["A"]);
        assert_eq!(graph.topological_order().unwrap(), vec!["A", "B"]);
    }

    #[test]
    fn test_topological_order() {
        let graph = DependencyGraph::build(&chain()).unwrap();
        let order = graph.topological_order().unwrap();
        assert!(position_of(&order, "A") < position_of(&order, "B"));
        assert!(position_of(&order, "B") < position_of(&order, "C"));
    }

    #[test]
    fn test_topological_order_reversed_input() {
        let tasks = vec![
            Task::new("C").with_dependency("B"),
            Task::new("B").with_dependency("A"),
            Task::new("A"),
            Task::new("D"),
        ];
        let graph = DependencyGraph::build(&tasks).unwrap();
        assert_eq!(graph.topological_order().unwrap(), vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_long_chain_builds() {
        // t_i waits on t_{i-1}, listed newest first.
        let n = 200_000;
        let tasks: Vec<Task> = (0..n)
            .rev()
            .map(|i| {
                let task = Task::new(format!("t{i}"));
                if i == 0 {
                    task
                } else {
                    task.with_dependency(format!("t{}", i - 1))
                }
            })
            .collect();

        let graph = DependencyGraph::build(&tasks).unwrap();
        let order = graph.topological_order().unwrap();
        assert_eq!(order.len(), n);
        assert_eq!(order[0], "t0");
        assert_eq!(order[n - 1], format!("t{}", n - 1));
    }

    #[test]
    fn test_long_chain_closed_into_cycle() {
        let n = 50_000;
        let tasks: Vec<Task> = (0..n)
            .map(|i| Task::new(format!("t{i}")).with_dependency(format!("t{}", (i + 1) % n)))
            .collect();
        let Err(GraphError::Cycle(ids)) = DependencyGraph::build(&tasks) else {
            panic!("expected cycle");
        };
        assert_eq!(ids.len(), n);
        assert_eq!(ids[0], "t0");
    }

    #[test]
    fn test_is_startable_status_mode() {
        let tasks = vec![
            Task::new("A").with_status(TaskStatus::InProgress).with_progress(100),
            Task::new("B").with_dependency("A"),
        ];
        let mut graph = DependencyGraph::build(&tasks).unwrap();
        assert!(!graph.is_startable("B", ReadinessMode::Status).unwrap());

        graph.set_status("A", TaskStatus::Completed).unwrap();
        assert!(graph.is_startable("B", ReadinessMode::Status).unwrap());
    }

    #[test]
    fn test_is_startable_progress_mode() {
        let tasks = vec![
            Task::new("A").with_status(TaskStatus::Completed).with_progress(80),
            Task::new("B").with_dependency("A"),
        ];
        let mut graph = DependencyGraph::build(&tasks).unwrap();
        assert!(graph.is_startable("B", ReadinessMode::Status).unwrap());
        assert!(!graph.is_startable("B", ReadinessMode::Progress).unwrap());

        graph.set_progress("A", 100).unwrap();
        assert!(graph.is_startable("B", ReadinessMode::Progress).unwrap());
    }

    #[test]
    fn test_is_startable_without_dependencies() {
        let graph = DependencyGraph::build(&chain()).unwrap();
        assert!(graph.is_startable("A", ReadinessMode::Status).unwrap());
        assert_eq!(
            graph.is_startable("nope", ReadinessMode::Status),
            Err(GraphError::UnknownTask("nope".into()))
        );
    }

    #[test]
    fn test_startable_tasks() {
        let tasks = vec![
            Task::new("A").with_status(TaskStatus::Completed),
            Task::new("B").with_dependency("A"),
            Task::new("C").with_dependency("B"),
            Task::new("D"),
        ];
        let graph = DependencyGraph::build(&tasks).unwrap();
        assert_eq!(graph.startable_tasks(ReadinessMode::Status), vec!["B", "D"]);
    }

    #[test]
    fn test_empty_graph() {
        let graph = DependencyGraph::build(&[]).unwrap();
        assert!(graph.is_empty());
        assert!(graph.topological_order().unwrap().is_empty());
    }
}
