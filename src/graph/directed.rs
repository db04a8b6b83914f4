use crate::graph::traits::{Graph, MutableGraph, Weight};
use crate::{Error, Result};

/// A directed graph implementation using adjacency lists
///
/// The vertex count is fixed at construction. Edges are only ever appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectedGraph<W>
where
    W: Weight,
{
    /// Outgoing edges for each vertex: vertex_id -> [(target_vertex, weight)]
    outgoing_edges: Vec<Vec<(usize, W)>>,

    edge_count: usize,
}

impl<W> DirectedGraph<W>
where
    W: Weight,
{
    /// Creates a directed graph with `vertices` isolated vertices
    pub fn with_vertices(vertices: usize) -> Self {
        DirectedGraph {
            outgoing_edges: vec![Vec::new(); vertices],
            edge_count: 0,
        }
    }

    /// Builds a graph from an explicit edge list
    pub fn from_edges<I>(vertices: usize, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize, W)>,
    {
        let mut graph = Self::with_vertices(vertices);
        for (from, to, weight) in edges {
            graph.add_edge(from, to, weight)?;
        }
        Ok(graph)
    }

    /// Largest single edge weight, or `None` for an edgeless graph
    pub fn max_edge_weight(&self) -> Option<W> {
        self.outgoing_edges
            .iter()
            .flat_map(|edges| edges.iter().map(|&(_, weight)| weight))
            .max()
    }
}

impl<W> Graph<W> for DirectedGraph<W>
where
    W: Weight,
{
    fn vertex_count(&self) -> usize {
        self.outgoing_edges.len()
    }

    fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn outgoing_edges(&self, vertex: usize) -> &[(usize, W)] {
        self.outgoing_edges
            .get(vertex)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl<W> MutableGraph<W> for DirectedGraph<W>
where
    W: Weight,
{
    fn add_edge(&mut self, from: usize, to: usize, weight: W) -> Result<()> {
        if !self.has_vertex(from) || !self.has_vertex(to) {
            return Err(Error::InvalidEdge(from, to));
        }

        self.outgoing_edges[from].push((to, weight));
        self.edge_count += 1;
        Ok(())
    }
}
