use std::collections::HashSet;

use log::warn;

use crate::graph::{Graph, Weight};
use crate::Result;

/// Shortest distances from one source, indexed by vertex
///
/// `None` marks a vertex with no path from the source.
pub type DistanceVector<W> = Vec<Option<W>>;

/// Result of a shortest path algorithm execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPathResult<W>
where
    W: Weight,
{
    /// Distances from source to each vertex
    pub distances: DistanceVector<W>,

    /// Predecessor vertices in the shortest path tree
    pub predecessors: Vec<Option<usize>>,

    /// Source vertex ID
    pub source: usize,
}

/// Trait for shortest path algorithms
pub trait ShortestPathAlgorithm<W, G>
where
    W: Weight,
    G: Graph<W>,
{
    /// Compute shortest paths from a source vertex to all other vertices
    fn compute_shortest_paths(&self, graph: &G, source: usize) -> Result<ShortestPathResult<W>>;

    /// Get the name of the algorithm
    fn name(&self) -> &'static str;

    /// Get the shortest path from source to target as a sequence of vertices
    fn get_path(&self, result: &ShortestPathResult<W>, target: usize) -> Option<Vec<usize>> {
        if target >= result.predecessors.len() || result.distances[target].is_none() {
            return None;
        }

        let mut path = Vec::new();
        let mut current = target;
        let mut visited = HashSet::new();

        while current != result.source {
            if !visited.insert(current) {
                warn!("cycle detected in predecessor chain at vertex {}", current);
                return None;
            }

            path.push(current);
            current = result.predecessors[current]?;
        }

        path.push(result.source);
        path.reverse();

        Some(path)
    }
}
