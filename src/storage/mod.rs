pub mod catalog;
pub mod engine;
pub mod file;
pub mod memory;
pub mod partition;

pub use catalog::PartitionName;
pub use engine::PartitionBackend;
pub use file::{DurabilityMode, FileBackend};
pub use memory::MemoryBackend;
pub use partition::PartitionStore;
