use std::ops::Range;
use std::panic;
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, error, info};

use crate::algorithm::{dijkstra::Dijkstra, ShortestPathAlgorithm};
use crate::batch::BatchRunner;
use crate::distributed::comm::{Communicator, LocalGroup};
use crate::distributed::partition::{local_range, GatherLayout};
use crate::graph::{Graph, Weight};
use crate::table::DistanceTable;
use crate::{Error, Result};

/// Rank that receives the gathered table
pub const COORDINATOR_RANK: usize = 0;

/// What one worker knows after the gather
#[derive(Debug, Clone)]
pub struct WorkerReport<W>
where
    W: Weight,
{
    pub rank: usize,
    pub workers: usize,
    /// Sources this worker computed rows for
    pub sources: Range<usize>,
    /// Time from the start barrier to the end of local computation
    pub elapsed: Duration,
    /// Full table, present on the coordinator rank only
    pub table: Option<DistanceTable<W>>,
}

/// Splits all-pairs work row-wise over a worker group and gathers the rows
///
/// Every worker holds an identical graph; only distance rows travel.
#[derive(Debug)]
pub struct DistributedCoordinator<'g, W, G, A = Dijkstra>
where
    W: Weight,
    G: Graph<W>,
    A: ShortestPathAlgorithm<W, G>,
{
    graph: &'g G,
    runner: BatchRunner<W, G, A>,
    root: usize,
}

impl<'g, W, G> DistributedCoordinator<'g, W, G, Dijkstra>
where
    W: Weight,
    G: Graph<W>,
{
    pub fn new(graph: &'g G) -> Self {
        Self::with_runner(graph, BatchRunner::new())
    }
}

impl<'g, W, G, A> DistributedCoordinator<'g, W, G, A>
where
    W: Weight,
    G: Graph<W>,
    A: ShortestPathAlgorithm<W, G>,
{
    pub fn with_runner(graph: &'g G, runner: BatchRunner<W, G, A>) -> Self {
        DistributedCoordinator {
            graph,
            runner,
            root: COORDINATOR_RANK,
        }
    }

    /// Gathers onto `root` instead of rank 0
    pub fn with_root(mut self, root: usize) -> Self {
        self.root = root;
        self
    }

    /// Runs this worker's share and takes part in the gather
    ///
    /// Must be called by every rank of `comm`'s group. Partition and layout
    /// are validated before the first barrier so that a bad configuration
    /// fails on all ranks alike instead of stranding the others.
    pub fn run<C>(&self, comm: &C) -> Result<WorkerReport<W>>
    where
        C: Communicator<Option<W>>,
    {
        let (rank, workers) = (comm.rank(), comm.size());
        let n = self.graph.vertex_count();

        if self.root >= workers {
            return Err(Error::InvalidPartition {
                rank: self.root,
                workers,
            });
        }
        let sources = local_range(n, workers, rank)?;
        let layout = if rank == self.root {
            Some(GatherLayout::new(n, workers)?)
        } else {
            None
        };

        comm.barrier();
        let start = Instant::now();

        debug!("rank {}/{}: computing sources {:?}", rank, workers, sources);
        let local = self.runner.compute_rows(self.graph, sources.clone());
        let elapsed = start.elapsed();

        // A failed worker still contributes, with an empty buffer, so the
        // root reports a size mismatch instead of waiting forever.
        let (buffer, local_error) = match local {
            Ok(buffer) => (buffer, None),
            Err(err) => {
                error!("rank {}: local computation failed: {}", rank, err);
                (Vec::new(), Some(err))
            }
        };

        let gathered = comm.gather_varcount(buffer, layout.as_ref(), self.root);
        if let Some(err) = local_error {
            return Err(err);
        }

        let table = gathered?
            .map(|flat| DistanceTable::from_flat(n, flat))
            .transpose()?;

        if table.is_some() {
            info!(
                "rank {}: gathered {} rows from {} workers, compute took {:?}",
                rank, n, workers, elapsed
            );
        }

        Ok(WorkerReport {
            rank,
            workers,
            sources,
            elapsed,
            table,
        })
    }
}

impl<'g, W, G, A> DistributedCoordinator<'g, W, G, A>
where
    W: Weight,
    G: Graph<W> + Sync,
    A: ShortestPathAlgorithm<W, G> + Sync,
{
    /// Runs a whole group of `workers` ranks as scoped threads
    ///
    /// Returns the coordinator's report. Any worker error is returned
    /// instead, the lowest rank first. A rank that panics before the gather
    /// leaves the others blocked at the barrier, so the call never returns;
    /// a panic after it is resumed on the calling thread.
    pub fn run_thread_group(&self, workers: usize) -> Result<WorkerReport<W>> {
        let group = LocalGroup::<Option<W>>::new(workers)?;

        let outcomes: Vec<Result<WorkerReport<W>>> = thread::scope(|scope| {
            let handles: Vec<_> = group
                .into_iter()
                .map(|comm| scope.spawn(move || self.run(&comm)))
                .collect();

            handles
                .into_iter()
                .map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|payload| panic::resume_unwind(payload))
                })
                .collect()
        });

        let mut reports = outcomes.into_iter().collect::<Result<Vec<_>>>()?;
        if self.root >= reports.len() {
            return Err(Error::InvalidPartition {
                rank: self.root,
                workers,
            });
        }
        Ok(reports.swap_remove(self.root))
    }
}
