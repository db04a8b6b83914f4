pub mod comm;
pub mod coordinator;
pub mod partition;

pub use comm::{Communicator, LocalCommunicator, LocalGroup};
pub use coordinator::{DistributedCoordinator, WorkerReport, COORDINATOR_RANK};
pub use partition::{local_range, row_count, GatherLayout};
