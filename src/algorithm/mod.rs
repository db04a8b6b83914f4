pub mod traits;
pub mod dijkstra;

pub use traits::{DistanceVector, ShortestPathAlgorithm, ShortestPathResult};
