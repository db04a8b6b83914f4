use std::fmt;

use serde::Serialize;

use crate::graph::Weight;
use crate::{Error, Result};

/// All-pairs distances stored row-major: row `i` holds distances from source `i`
///
/// This is the exact layout the worker gather produces, so a gathered buffer
/// becomes a table without copying.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistanceTable<W>
where
    W: Weight,
{
    vertex_count: usize,
    distances: Vec<Option<W>>,
}

impl<W> DistanceTable<W>
where
    W: Weight,
{
    /// Wraps a flat buffer of `vertex_count * vertex_count` entries
    pub fn from_flat(vertex_count: usize, distances: Vec<Option<W>>) -> Result<Self> {
        if vertex_count.checked_mul(vertex_count) != Some(distances.len()) {
            return Err(Error::TableShape {
                vertex_count,
                len: distances.len(),
            });
        }
        Ok(DistanceTable {
            vertex_count,
            distances,
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Distances from `source`, or `None` if it is not a vertex
    pub fn row(&self, source: usize) -> Option<&[Option<W>]> {
        if source >= self.vertex_count {
            return None;
        }
        let start = source * self.vertex_count;
        Some(&self.distances[start..start + self.vertex_count])
    }

    /// Distance from `source` to `target`; `None` if unreachable or out of range
    pub fn get(&self, source: usize, target: usize) -> Option<W> {
        if target >= self.vertex_count {
            return None;
        }
        self.row(source).and_then(|row| row[target])
    }

    /// Rows in source order
    pub fn rows(&self) -> impl Iterator<Item = &[Option<W>]> + '_ {
        // chunks() rejects a zero chunk size
        self.distances.chunks(self.vertex_count.max(1))
    }

    pub fn as_flat(&self) -> &[Option<W>] {
        &self.distances
    }

    pub fn into_flat(self) -> Vec<Option<W>> {
        self.distances
    }

    /// Number of (source, target) pairs with a finite distance
    pub fn reachable_pairs(&self) -> usize {
        self.distances.iter().filter(|d| d.is_some()).count()
    }

    pub fn to_json(&self) -> Result<String>
    where
        W: Serialize,
    {
        Ok(serde_json::to_string(self)?)
    }
}

impl<W> fmt::Display for DistanceTable<W>
where
    W: Weight,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (source, row) in self.rows().enumerate() {
            writeln!(f, "From vertex {}:", source)?;
            for (target, distance) in row.iter().enumerate() {
                match distance {
                    Some(d) => writeln!(f, "  To vertex {}: {}", target, d)?,
                    None => writeln!(f, "  To vertex {}: inf", target)?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
