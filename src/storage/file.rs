use super::engine::PartitionBackend;
use crate::core::{BoardError, Result};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DurabilityMode {
    /// fsync each partition file before it replaces the previous one
    #[default]
    Sync,
    /// atomic rename without fsync
    Async,
    /// keep partitions in memory only
    None,
}

impl DurabilityMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sync" => Some(Self::Sync),
            "async" => Some(Self::Async),
            "none" | "memory" => Some(Self::None),
            _ => None,
        }
    }
}

/// One file per partition under a data directory.
pub struct FileBackend {
    root: PathBuf,
    durability_mode: DurabilityMode,
}

impl FileBackend {
    pub fn new<P: AsRef<Path>>(root: P, durability_mode: DurabilityMode) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            durability_mode,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }
}

impl PartitionBackend for FileBackend {
    fn read(&self, file_name: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(file_name);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(BoardError::Io(format!(
                "Failed to read partition file '{}': {}",
                path.display(),
                e
            ))),
        }
    }

    fn write(&self, file_name: &str, bytes: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.root).map_err(|e| {
            BoardError::Io(format!(
                "Failed to create data directory '{}': {}",
                self.root.display(),
                e
            ))
        })?;

        // The temp file lives in the target directory so the final rename
        // never crosses a filesystem boundary.
        let mut temp = NamedTempFile::new_in(&self.root)
            .map_err(|e| BoardError::Io(format!("Failed to create temp file: {}", e)))?;
        temp.write_all(bytes)
            .map_err(|e| BoardError::Io(format!("Failed to write temp file: {}", e)))?;
        temp.flush()
            .map_err(|e| BoardError::Io(format!("Failed to flush temp file: {}", e)))?;
        if self.durability_mode == DurabilityMode::Sync {
            temp.as_file()
                .sync_all()
                .map_err(|e| BoardError::Io(format!("Failed to sync temp file: {}", e)))?;
        }

        let path = self.path_for(file_name);
        temp.persist(&path).map_err(|e| {
            BoardError::Io(format!(
                "Failed to replace partition file '{}': {}",
                path.display(),
                e.error
            ))
        })?;
        Ok(())
    }

    fn exists(&self, file_name: &str) -> Result<bool> {
        Ok(self.path_for(file_name).try_exists()?)
    }

    fn describe(&self) -> String {
        format!("file:{}", self.root.display())
    }
}
