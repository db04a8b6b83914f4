//! Static row-wise partition of source vertices across a fixed set of workers.
//!
//! Every worker evaluates these functions on the same `(N, W)` and gets the
//! same answer, so ownership never has to be negotiated.

use std::ops::Range;

use crate::{Error, Result};

fn check(workers: usize, rank: usize) -> Result<()> {
    if workers == 0 || rank >= workers {
        return Err(Error::InvalidPartition { rank, workers });
    }
    Ok(())
}

/// Number of sources owned by `rank`
///
/// Each rank gets `N / W` sources; the first `N % W` ranks get one more.
pub fn row_count(sources: usize, workers: usize, rank: usize) -> Result<usize> {
    check(workers, rank)?;
    let base = sources / workers;
    let extra = usize::from(rank < sources % workers);
    Ok(base + extra)
}

/// Contiguous block `[start, end)` of sources owned by `rank`
pub fn local_range(sources: usize, workers: usize, rank: usize) -> Result<Range<usize>> {
    let len = row_count(sources, workers, rank)?;
    let start = rank * (sources / workers) + rank.min(sources % workers);
    Ok(start..start + len)
}

/// Receive counts and displacements for gathering flat distance rows
///
/// Both are measured in buffer elements: rank `r` contributes
/// `row_count(r) * vertex_count` entries, placed right after rank `r - 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatherLayout {
    pub counts: Vec<usize>,
    pub displacements: Vec<usize>,
}

impl GatherLayout {
    pub fn new(vertex_count: usize, workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(Error::InvalidPartition { rank: 0, workers });
        }

        let mut counts = Vec::with_capacity(workers);
        let mut displacements = Vec::with_capacity(workers);
        let mut offset = 0;
        for rank in 0..workers {
            let count = row_count(vertex_count, workers, rank)? * vertex_count;
            counts.push(count);
            displacements.push(offset);
            offset += count;
        }

        Ok(GatherLayout {
            counts,
            displacements,
        })
    }

    pub fn workers(&self) -> usize {
        self.counts.len()
    }

    /// Size of the fully gathered buffer
    pub fn total(&self) -> usize {
        self.counts
            .iter()
            .zip(&self.displacements)
            .map(|(count, displacement)| count + displacement)
            .max()
            .unwrap_or(0)
    }
}
