use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::graph::{DirectedGraph, Graph, MutableGraph, Weight};
use crate::{Error, Result};

/// How far forward and backward a generated edge may reach
pub const NEIGHBOURHOOD_WINDOW: usize = 5;

/// Generates a sparse directed graph with index locality
///
/// Every vertex `i` gets one edge to a uniformly chosen vertex among the next
/// (up to) five and one edge to a uniformly chosen vertex among the previous
/// (up to) five. The last vertex has no forward edge and the first has no
/// backward edge. Weights are uniform in `[1, max_weight]`.
///
/// Random draws happen in a fixed order per vertex (forward target, forward
/// weight, backward target, backward weight), so a given rng state always
/// yields the same graph. Near the ends of the index range the window shrinks,
/// which gives the first and last few vertices a slightly biased degree.
pub fn generate_random_graph<W, R>(
    vertex_count: usize,
    max_weight: W,
    rng: &mut R,
) -> Result<DirectedGraph<W>>
where
    W: Weight,
    R: Rng + ?Sized,
{
    if max_weight < W::one() {
        return Err(Error::InvalidWeightBound);
    }

    let mut graph = DirectedGraph::with_vertices(vertex_count);

    for i in 0..vertex_count {
        if i + 1 < vertex_count {
            let window = NEIGHBOURHOOD_WINDOW.min(vertex_count - i - 1);
            let next = (i + 1 + rng.gen_range(0..window)).min(vertex_count - 1);
            let weight = rng.gen_range(W::one()..=max_weight);
            graph.add_edge(i, next, weight)?;
        }

        if i > 0 {
            let window = NEIGHBOURHOOD_WINDOW.min(i);
            let prev = i - 1 - rng.gen_range(0..window);
            let weight = rng.gen_range(W::one()..=max_weight);
            graph.add_edge(i, prev, weight)?;
        }
    }

    debug!(
        "generated random graph: {} vertices, {} edges",
        vertex_count,
        graph.edge_count()
    );

    Ok(graph)
}

/// Same as [`generate_random_graph`] with a `StdRng` seeded from `seed`
///
/// Every worker that calls this with identical arguments builds an identical
/// graph, so no edge data has to be exchanged between workers.
pub fn seeded_random_graph<W>(vertex_count: usize, max_weight: W, seed: u64) -> Result<DirectedGraph<W>>
where
    W: Weight,
{
    let mut rng = StdRng::seed_from_u64(seed);
    generate_random_graph(vertex_count, max_weight, &mut rng)
}

/// The five-vertex graph used as a hand-checkable example
///
/// ```text
/// (0) --1-- (1) --1-- (2)
///  |         |         |
///  2         4         3
///  |         |         |
/// (3) --1-- (4) -------+
/// ```
///
/// All edges point from the lower to the higher index.
pub fn sample_graph<W>() -> Result<DirectedGraph<W>>
where
    W: Weight,
{
    let edges = [(0, 1, 1u8), (1, 2, 1), (2, 4, 3), (0, 3, 2), (3, 4, 1), (1, 4, 4)];
    let mut graph = DirectedGraph::with_vertices(5);
    for (from, to, weight) in edges {
        let weight: W = num_traits::cast(weight).ok_or(Error::InvalidWeightBound)?;
        graph.add_edge(from, to, weight)?;
    }
    Ok(graph)
}
