//! Runs the single-source engine once per source to fill a [`DistanceTable`].

use std::marker::PhantomData;
use std::ops::Range;
use std::time::{Duration, Instant};

use log::{debug, info};
use rayon::prelude::*;

use crate::algorithm::{dijkstra::Dijkstra, ShortestPathAlgorithm};
use crate::graph::{Graph, Weight};
use crate::table::DistanceTable;
use crate::{Error, Result};

/// A finished table together with how long it took to compute
#[derive(Debug, Clone)]
pub struct BatchReport<W>
where
    W: Weight,
{
    pub table: DistanceTable<W>,
    pub elapsed: Duration,
}

/// Composes per-source shortest path runs into all-pairs tables
#[derive(Debug, Clone)]
pub struct BatchRunner<W, G, A = Dijkstra>
where
    W: Weight,
    G: Graph<W>,
    A: ShortestPathAlgorithm<W, G>,
{
    algorithm: A,
    _marker: PhantomData<fn(&G) -> W>,
}

impl<W, G> BatchRunner<W, G, Dijkstra>
where
    W: Weight,
    G: Graph<W>,
{
    /// Batch runner backed by [`Dijkstra`]
    pub fn new() -> Self {
        Self::with_algorithm(Dijkstra::new())
    }
}

impl<W, G> Default for BatchRunner<W, G, Dijkstra>
where
    W: Weight,
    G: Graph<W>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<W, G, A> BatchRunner<W, G, A>
where
    W: Weight,
    G: Graph<W>,
    A: ShortestPathAlgorithm<W, G>,
{
    pub fn with_algorithm(algorithm: A) -> Self {
        BatchRunner {
            algorithm,
            _marker: PhantomData,
        }
    }

    /// Distances for every source in `sources`, concatenated in source order
    ///
    /// The buffer holds `sources.len() * vertex_count` entries.
    pub fn compute_rows(&self, graph: &G, sources: Range<usize>) -> Result<Vec<Option<W>>> {
        let n = graph.vertex_count();
        if sources.end > n {
            return Err(Error::InvalidVertex(sources.end - 1));
        }

        let mut buffer = Vec::with_capacity(sources.len() * n);
        for source in sources {
            let result = self.algorithm.compute_shortest_paths(graph, source)?;
            buffer.extend(result.distances);
        }
        Ok(buffer)
    }

    /// Sequential all-pairs table, one source after another
    pub fn compute_all_pairs(&self, graph: &G) -> Result<DistanceTable<W>> {
        self.run_sequential(graph).map(|report| report.table)
    }

    /// Sequential all-pairs table plus the wall-clock time it took
    pub fn run_sequential(&self, graph: &G) -> Result<BatchReport<W>> {
        let n = graph.vertex_count();
        debug!(
            "{}: sequential all-pairs over {} vertices",
            self.algorithm.name(),
            n
        );

        let start = Instant::now();
        let buffer = self.compute_rows(graph, 0..n)?;
        let elapsed = start.elapsed();

        info!("sequential all-pairs finished in {:?}", elapsed);

        Ok(BatchReport {
            table: DistanceTable::from_flat(n, buffer)?,
            elapsed,
        })
    }
}

impl<W, G, A> BatchRunner<W, G, A>
where
    W: Weight,
    G: Graph<W> + Sync,
    A: ShortestPathAlgorithm<W, G> + Sync,
{
    /// All-pairs table with sources spread over the rayon thread pool
    ///
    /// Rows are collected back in source order, so the table is identical to
    /// the sequential one.
    pub fn compute_all_pairs_parallel(&self, graph: &G) -> Result<DistanceTable<W>> {
        self.run_parallel(graph).map(|report| report.table)
    }

    pub fn run_parallel(&self, graph: &G) -> Result<BatchReport<W>> {
        let n = graph.vertex_count();
        debug!(
            "{}: parallel all-pairs over {} vertices on {} threads",
            self.algorithm.name(),
            n,
            rayon::current_num_threads()
        );

        let start = Instant::now();
        let rows: Vec<Vec<Option<W>>> = (0..n)
            .into_par_iter()
            .map(|source| {
                self.algorithm
                    .compute_shortest_paths(graph, source)
                    .map(|result| result.distances)
            })
            .collect::<Result<_>>()?;
        let elapsed = start.elapsed();

        info!("parallel all-pairs finished in {:?}", elapsed);

        Ok(BatchReport {
            table: DistanceTable::from_flat(n, rows.concat())?,
            elapsed,
        })
    }
}
