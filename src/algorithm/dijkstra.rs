use crate::algorithm::{DistanceVector, ShortestPathAlgorithm, ShortestPathResult};
use crate::data_structures::BinaryHeapWrapper;
use crate::graph::{Graph, Weight};
use crate::{Error, Result};

/// Classic Dijkstra's algorithm implementation
///
/// Stateless: every call allocates its own distance, predecessor and queue
/// storage, so repeated queries on an unchanged graph return identical
/// results and one instance can be shared across threads.
#[derive(Debug, Default, Clone, Copy)]
pub struct Dijkstra;

impl Dijkstra {
    /// Creates a new Dijkstra algorithm instance
    pub fn new() -> Self {
        Dijkstra
    }

    /// Distances from `source` to every vertex of `graph`
    pub fn shortest_path<W, G>(&self, graph: &G, source: usize) -> Result<DistanceVector<W>>
    where
        W: Weight,
        G: Graph<W>,
    {
        <Self as ShortestPathAlgorithm<W, G>>::compute_shortest_paths(self, graph, source)
            .map(|result| result.distances)
    }
}

impl<W, G> ShortestPathAlgorithm<W, G> for Dijkstra
where
    W: Weight,
    G: Graph<W>,
{
    fn name(&self) -> &'static str {
        "Dijkstra"
    }

    fn compute_shortest_paths(&self, graph: &G, source: usize) -> Result<ShortestPathResult<W>> {
        if !graph.has_vertex(source) {
            return Err(Error::InvalidVertex(source));
        }

        let n = graph.vertex_count();

        let mut distances: DistanceVector<W> = vec![None; n];
        let mut predecessors: Vec<Option<usize>> = vec![None; n];
        let mut settled = vec![false; n];
        // Tail of the last relaxation whose sum did not fit in W, per target
        let mut overflowed: Vec<Option<usize>> = vec![None; n];

        distances[source] = Some(W::zero());

        let mut queue = BinaryHeapWrapper::with_capacity(n);
        queue.push(source, W::zero());

        while let Some((u, dist_u)) = queue.pop() {
            // Stale entry: u was finalized through a cheaper entry already
            if settled[u] {
                continue;
            }
            settled[u] = true;

            for &(v, weight) in graph.outgoing_edges(u) {
                if settled[v] {
                    continue;
                }

                // A sum above W::MAX can never beat a finite distance
                let new_dist = match dist_u.checked_add(&weight) {
                    Some(sum) => sum,
                    None => {
                        overflowed[v] = Some(u);
                        continue;
                    }
                };

                let improves = match distances[v] {
                    None => true,
                    Some(current) => new_dist < current,
                };

                if improves {
                    distances[v] = Some(new_dist);
                    predecessors[v] = Some(u);
                    queue.push(v, new_dist);
                }
            }
        }

        // Only a vertex whose every route overflowed is an error
        if let Some((v, u)) = overflowed
            .iter()
            .enumerate()
            .find_map(|(v, tail)| tail.filter(|_| distances[v].is_none()).map(|u| (v, u)))
        {
            return Err(Error::DistanceOverflow(u, v));
        }

        Ok(ShortestPathResult {
            distances,
            predecessors,
            source,
        })
    }
}
