//! Collective communication between a fixed group of workers.
//!
//! [`Communicator`] is the contract the coordinator needs from a process-group
//! runtime: a rank and size fixed at startup, a barrier, and a gather with
//! per-rank receive counts and displacements. [`LocalGroup`] provides it for
//! workers running as threads of one process.

use std::sync::{Arc, Barrier};

use crossbeam::channel::{unbounded, Receiver, Sender};
use log::trace;

use crate::distributed::partition::GatherLayout;
use crate::{Error, Result};

/// One worker's view of the group
pub trait Communicator<T> {
    /// This worker's identity in `[0, size)`
    fn rank(&self) -> usize;

    /// Number of workers in the group
    fn size(&self) -> usize;

    /// Blocks until every worker in the group has called `barrier`
    fn barrier(&self);

    /// Collects every worker's `local` buffer onto `root`
    ///
    /// Only the root needs a `layout`; other ranks pass `None` and get
    /// `Ok(None)` back. On the root the result holds rank `r`'s buffer at
    /// `layout.displacements[r]`. Every rank returns only after the root has
    /// received all contributions.
    fn gather_varcount(
        &self,
        local: Vec<T>,
        layout: Option<&GatherLayout>,
        root: usize,
    ) -> Result<Option<Vec<T>>>;
}

#[derive(Debug)]
struct Contribution<T> {
    rank: usize,
    data: Vec<T>,
}

/// In-process group of `size` connected communicators
///
/// Each member owns an unbounded inbox; a gather sends every non-root buffer
/// into the root's inbox and ends with a shared barrier. There is no timeout:
/// a member that never reaches the gather blocks the rest of the group.
#[derive(Debug)]
pub struct LocalGroup<T> {
    members: Vec<LocalCommunicator<T>>,
}

impl<T> LocalGroup<T>
where
    T: Send,
{
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(Error::InvalidPartition {
                rank: 0,
                workers: 0,
            });
        }

        let barrier = Arc::new(Barrier::new(size));
        let (senders, receivers): (Vec<_>, Vec<_>) = (0..size).map(|_| unbounded()).unzip();

        let members = receivers
            .into_iter()
            .enumerate()
            .map(|(rank, inbox)| LocalCommunicator {
                rank,
                size,
                barrier: Arc::clone(&barrier),
                outboxes: senders.clone(),
                inbox,
            })
            .collect();

        Ok(LocalGroup { members })
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl<T> IntoIterator for LocalGroup<T> {
    type Item = LocalCommunicator<T>;
    type IntoIter = std::vec::IntoIter<LocalCommunicator<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.into_iter()
    }
}

/// A member of a [`LocalGroup`], meant to be moved onto its worker thread
#[derive(Debug)]
pub struct LocalCommunicator<T> {
    rank: usize,
    size: usize,
    barrier: Arc<Barrier>,
    outboxes: Vec<Sender<Contribution<T>>>,
    inbox: Receiver<Contribution<T>>,
}

impl<T> LocalCommunicator<T>
where
    T: Clone + Default + Send,
{
    fn receive_all(&self, local: Vec<T>, layout: &GatherLayout) -> Result<Vec<T>> {
        if layout.workers() != self.size {
            return Err(Error::Communication(format!(
                "gather layout describes {} workers, group has {}",
                layout.workers(),
                self.size
            )));
        }

        let mut parts: Vec<Option<Vec<T>>> = (0..self.size).map(|_| None).collect();
        parts[self.rank] = Some(local);

        for _ in 1..self.size {
            let Contribution { rank, data } = self
                .inbox
                .recv()
                .map_err(|err| Error::Communication(err.to_string()))?;
            trace!("root {} received {} elements from rank {}", self.rank, data.len(), rank);
            if parts[rank].replace(data).is_some() {
                return Err(Error::Communication(format!(
                    "rank {} contributed twice to one gather",
                    rank
                )));
            }
        }

        let mut gathered = vec![T::default(); layout.total()];
        for (rank, data) in parts.into_iter().enumerate() {
            let data = data.unwrap_or_default();
            let expected = layout.counts[rank];
            if data.len() != expected {
                return Err(Error::GatherSizeMismatch {
                    rank,
                    expected,
                    actual: data.len(),
                });
            }
            let at = layout.displacements[rank];
            for (slot, value) in gathered[at..at + expected].iter_mut().zip(data) {
                *slot = value;
            }
        }

        Ok(gathered)
    }
}

impl<T> Communicator<T> for LocalCommunicator<T>
where
    T: Clone + Default + Send,
{
    fn rank(&self) -> usize {
        self.rank
    }

    fn size(&self) -> usize {
        self.size
    }

    fn barrier(&self) {
        self.barrier.wait();
    }

    fn gather_varcount(
        &self,
        local: Vec<T>,
        layout: Option<&GatherLayout>,
        root: usize,
    ) -> Result<Option<Vec<T>>> {
        if root >= self.size {
            return Err(Error::InvalidPartition {
                rank: root,
                workers: self.size,
            });
        }

        let outcome = if self.rank == root {
            match layout {
                Some(layout) => self.receive_all(local, layout).map(Some),
                None => Err(Error::Communication(
                    "root rank needs a gather layout".to_string(),
                )),
            }
        } else {
            self.outboxes[root]
                .send(Contribution {
                    rank: self.rank,
                    data: local,
                })
                .map(|_| None)
                .map_err(|_| {
                    Error::Communication(format!("rank {} lost its link to root {}", self.rank, root))
                })
        };

        // Everyone leaves together, after the root holds every buffer
        self.barrier.wait();
        outcome
    }
}
