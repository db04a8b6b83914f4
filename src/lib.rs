//! Dist Dijkstra - all-pairs shortest paths, sequential or split across workers
//!
//! The engine runs Dijkstra's algorithm from one source at a time over a
//! weighted directed graph. Full distance tables are assembled either by a
//! sequential batch runner, a rayon-backed runner, or a fixed group of
//! workers that each own a contiguous block of sources and gather their rows
//! onto a single coordinator rank.

pub mod algorithm;
pub mod batch;
pub mod config;
pub mod data_structures;
pub mod distributed;
pub mod graph;
pub mod table;

pub use algorithm::{dijkstra::Dijkstra, DistanceVector, ShortestPathAlgorithm, ShortestPathResult};
pub use batch::{BatchReport, BatchRunner};
pub use distributed::{DistributedCoordinator, LocalGroup, WorkerReport};
/// Re-export main types for convenient use
pub use graph::directed::DirectedGraph;
pub use graph::Weight;
pub use table::DistanceTable;

/// Error types for the library
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Invalid vertex ID: {0}")]
    InvalidVertex(usize),

    #[error("Invalid edge: from {0} to {1}")]
    InvalidEdge(usize, usize),

    #[error("Maximum edge weight must be at least 1")]
    InvalidWeightBound,

    #[error("Distance overflow relaxing edge {0} -> {1}")]
    DistanceOverflow(usize, usize),

    #[error("Invalid partition: rank {rank} of {workers} workers")]
    InvalidPartition { rank: usize, workers: usize },

    #[error("Gather size mismatch from rank {rank}: expected {expected} elements, got {actual}")]
    GatherSizeMismatch {
        rank: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Distance table for {vertex_count} vertices cannot hold {len} entries")]
    TableShape { vertex_count: usize, len: usize },

    #[error("Worker communication failed: {0}")]
    Communication(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;
