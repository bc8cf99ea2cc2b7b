use super::engine::PartitionBackend;
use crate::core::Result;
use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Partitions held in process memory. Used for `DurabilityMode::None` and tests.
#[derive(Default)]
pub struct MemoryBackend {
    partitions: RwLock<HashMap<String, Vec<u8>>>,
    /// Number of successful writes, so callers can assert nothing was written.
    writes: AtomicUsize,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Names of every partition written so far, sorted.
    pub fn file_names(&self) -> Result<Vec<String>> {
        let partitions = self.partitions.read()?;
        let mut names: Vec<String> = partitions.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}

impl PartitionBackend for MemoryBackend {
    fn read(&self, file_name: &str) -> Result<Option<Vec<u8>>> {
        let partitions = self.partitions.read()?;
        Ok(partitions.get(file_name).cloned())
    }

    fn write(&self, file_name: &str, bytes: &[u8]) -> Result<()> {
        let mut partitions = self.partitions.write()?;
        partitions.insert(file_name.to_string(), bytes.to_vec());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn exists(&self, file_name: &str) -> Result<bool> {
        let partitions = self.partitions.read()?;
        Ok(partitions.contains_key(file_name))
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
