use crate::core::Result;

/// Byte-level storage for named partitions - allows pluggable backends.
///
/// Implementations must make `write` atomic from a reader's perspective:
/// a concurrent or subsequent `read` sees either the old bytes or the new
/// bytes, never a mix.
pub trait PartitionBackend: Send + Sync {
    /// Read the full contents of a partition; `None` if it was never written.
    fn read(&self, file_name: &str) -> Result<Option<Vec<u8>>>;

    /// Replace the full contents of a partition.
    fn write(&self, file_name: &str, bytes: &[u8]) -> Result<()>;

    /// Check whether a partition has been written.
    fn exists(&self, file_name: &str) -> Result<bool>;

    /// Short description used in log events.
    fn describe(&self) -> String;
}
