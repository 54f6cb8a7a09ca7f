use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::fmt::{Debug, Formatter};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TopologyError<T>
where
    T: Debug,
{
    #[error("Cycle detected in dependency graph, via {:?}", .0)]
    CycleDetected(DepRoute<T>),
    #[error("Duplicate edge detected in dependency graph, from {:?}", .0)]
    DuplicateEdge(DepRoute<T>),
}

/// A path through the graph; first element is the start node, last the end.
pub struct DepRoute<T> {
    route: Vec<T>,
}

impl<T> Debug for DepRoute<T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let len = self.route.len();
        if len == 0 {
            return write!(f, "[]");
        }
        for item in &self.route[..len - 1] {
            write!(f, "{item:?} -> ")?;
        }
        write!(f, "{:?}", self.route[len - 1])
    }
}

/// Directed dependency graph used to validate compute declarations.
///
/// Edges point from a dependency to the compute that declares it. The graph
/// only exists for verification: recomputation itself walks the context's
/// dependents index, which stays correct as long as the graph is acyclic.
#[derive(Debug)]
pub struct Graph<Node>
where
    Node: Debug + Copy + Ord,
{
    edges: BTreeMap<Node, BTreeSet<Node>>,
}

impl<Node> Default for Graph<Node>
where
    Node: Debug + Copy + Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<Node> Graph<Node>
where
    Node: Debug + Copy + Ord,
{
    pub fn new() -> Self {
        Self {
            edges: BTreeMap::new(),
        }
    }

    pub fn route_to(&mut self, from: Node, to: Node) -> Result<(), TopologyError<Node>> {
        if !self.edges.entry(from).or_default().insert(to) {
            return Err(TopologyError::DuplicateEdge(DepRoute {
                route: vec![from, to],
            }));
        }
        Ok(())
    }

    /// Kahn's algorithm; on a stall the offending cycle is reported.
    pub fn topology_sort(&self) -> Result<(), TopologyError<Node>> {
        let mut indegree: BTreeMap<Node, usize> = BTreeMap::new();
        for (&from, tos) in &self.edges {
            indegree.entry(from).or_insert(0);
            for &to in tos {
                *indegree.entry(to).or_insert(0) += 1;
            }
        }

        let mut queue: VecDeque<Node> = indegree
            .iter()
            .filter(|&(_, &degree)| degree == 0)
            .map(|(&node, _)| node)
            .collect();
        let mut remaining = indegree.len();

        while let Some(node) = queue.pop_front() {
            remaining -= 1;
            if let Some(tos) = self.edges.get(&node) {
                for to in tos {
                    if let Some(degree) = indegree.get_mut(to) {
                        *degree -= 1;
                        if *degree == 0 {
                            queue.push_back(*to);
                        }
                    }
                }
            }
        }

        if remaining == 0 {
            Ok(())
        } else {
            let route = self.find_cycle().unwrap_or_default();
            Err(TopologyError::CycleDetected(DepRoute { route }))
        }
    }

    fn find_cycle(&self) -> Option<Vec<Node>> {
        let mut visited = BTreeSet::new();
        for &start in self.edges.keys() {
            if visited.contains(&start) {
                continue;
            }
            let mut path = Vec::new();
            let mut on_path = BTreeSet::new();
            if let Some(cycle) = self.dfs(start, &mut visited, &mut path, &mut on_path) {
                return Some(cycle);
            }
        }
        None
    }

    fn dfs(
        &self,
        node: Node,
        visited: &mut BTreeSet<Node>,
        path: &mut Vec<Node>,
        on_path: &mut BTreeSet<Node>,
    ) -> Option<Vec<Node>> {
        visited.insert(node);
        on_path.insert(node);
        path.push(node);

        if let Some(nexts) = self.edges.get(&node) {
            for &next in nexts {
                if on_path.contains(&next) {
                    let pos = path.iter().position(|&n| n == next).unwrap_or(0);
                    let mut cycle = path[pos..].to_vec();
                    cycle.push(next);
                    return Some(cycle);
                }
                if !visited.contains(&next)
                    && let Some(cycle) = self.dfs(next, visited, path, on_path)
                {
                    return Some(cycle);
                }
            }
        }

        on_path.remove(&node);
        path.pop();
        None
    }
}
