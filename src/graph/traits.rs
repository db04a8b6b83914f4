use std::fmt::{Debug, Display};

use num_traits::{PrimInt, Unsigned};
use rand::distributions::uniform::SampleUniform;

use crate::Result;

/// Edge weight type: any unsigned primitive integer
///
/// Unsigned weights make negative edges unrepresentable, which is the only
/// precondition Dijkstra's algorithm needs.
pub trait Weight:
    PrimInt + Unsigned + SampleUniform + Debug + Display + Send + Sync + 'static
{
}

impl<T> Weight for T where
    T: PrimInt + Unsigned + SampleUniform + Debug + Display + Send + Sync + 'static
{
}

/// Trait representing a weighted directed graph
pub trait Graph<W>: Debug
where
    W: Weight,
{
    /// Returns the number of vertices in the graph
    fn vertex_count(&self) -> usize;

    /// Returns the number of edges in the graph
    fn edge_count(&self) -> usize;

    /// Returns the outgoing edges of a vertex in insertion order
    ///
    /// Vertices outside the graph have no edges.
    fn outgoing_edges(&self, vertex: usize) -> &[(usize, W)];

    /// Returns true if the vertex exists in the graph
    fn has_vertex(&self, vertex: usize) -> bool {
        vertex < self.vertex_count()
    }

    /// Returns true if there's an edge between the two vertices
    fn has_edge(&self, from: usize, to: usize) -> bool {
        self.outgoing_edges(from).iter().any(|&(target, _)| target == to)
    }

    /// Gets the weight of the cheapest edge between two vertices, if any
    fn get_edge_weight(&self, from: usize, to: usize) -> Option<W> {
        self.outgoing_edges(from)
            .iter()
            .filter(|&&(target, _)| target == to)
            .map(|&(_, weight)| weight)
            .min()
    }
}

/// Trait for append-only graph construction
pub trait MutableGraph<W>: Graph<W>
where
    W: Weight,
{
    /// Appends a directed edge. Parallel edges are kept side by side.
    fn add_edge(&mut self, from: usize, to: usize, weight: W) -> Result<()>;
}
