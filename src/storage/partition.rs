//! Typed whole-collection load/save over a [`PartitionBackend`].
//!
//! A partition holds exactly one ordered `Vec<T>`. Every save re-encodes the
//! entire sequence and replaces the stored bytes in one backend write; there
//! is no partial-append primitive. The encoding is a MessagePack envelope
//! carrying a format version and the entity kind, so a partition holding the
//! wrong kind of record is reported as corrupt instead of decoded as garbage.
//!
//! Reading distinguishes three outcomes:
//! - never written: an empty collection
//! - decodable: the stored collection
//! - present but undecodable: `BoardError::CorruptPartition`

use super::catalog::PartitionName;
use super::engine::PartitionBackend;
use crate::core::{BoardError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

pub const PARTITION_FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    format_version: u32,
    kind: &'a str,
    items: &'a [T],
}

#[derive(Deserialize)]
struct Envelope<T> {
    format_version: u32,
    kind: String,
    items: Vec<T>,
}

#[derive(Clone)]
pub struct PartitionStore {
    backend: Arc<dyn PartitionBackend>,
}

impl PartitionStore {
    pub fn new(backend: Arc<dyn PartitionBackend>) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &Arc<dyn PartitionBackend> {
        &self.backend
    }

    pub fn exists(&self, name: &PartitionName) -> Result<bool> {
        self.backend.exists(&name.file_name())
    }

    /// Load a partition, treating an absent partition as empty.
    pub fn load<T: DeserializeOwned>(&self, name: &PartitionName) -> Result<Vec<T>> {
        Ok(self.load_existing(name)?.unwrap_or_default())
    }

    /// Load a partition, returning `None` if it has never been written.
    pub fn load_existing<T: DeserializeOwned>(
        &self,
        name: &PartitionName,
    ) -> Result<Option<Vec<T>>> {
        let Some(bytes) = self.backend.read(&name.file_name())? else {
            debug!(partition = %name, "partition absent");
            return Ok(None);
        };
        let items = decode(name, &bytes)?;
        debug!(partition = %name, items = items.len(), bytes = bytes.len(), "partition loaded");
        Ok(Some(items))
    }

    /// Replace the whole partition with `items`.
    pub fn save<T: Serialize>(&self, name: &PartitionName, items: &[T]) -> Result<()> {
        let bytes = encode(name, items)?;
        self.backend.write(&name.file_name(), &bytes)?;
        debug!(partition = %name, items = items.len(), bytes = bytes.len(), "partition saved");
        Ok(())
    }
}

fn encode<T: Serialize>(name: &PartitionName, items: &[T]) -> Result<Vec<u8>> {
    let envelope = EnvelopeRef {
        format_version: PARTITION_FORMAT_VERSION,
        kind: name.kind(),
        items,
    };
    rmp_serde::to_vec_named(&envelope)
        .map_err(|e| BoardError::Io(format!("Failed to serialize partition '{}': {}", name, e)))
}

fn decode<T: DeserializeOwned>(name: &PartitionName, bytes: &[u8]) -> Result<Vec<T>> {
    if bytes.is_empty() {
        return Err(BoardError::corrupt(name.to_string(), "partition file is empty"));
    }
    let envelope: Envelope<T> = rmp_serde::from_slice(bytes)
        .map_err(|e| BoardError::corrupt(name.to_string(), e.to_string()))?;
    if envelope.format_version != PARTITION_FORMAT_VERSION {
        return Err(BoardError::corrupt(
            name.to_string(),
            format!("unsupported format version {}", envelope.format_version),
        ));
    }
    if envelope.kind != name.kind() {
        return Err(BoardError::corrupt(
            name.to_string(),
            format!("expected '{}' records, found '{}'", name.kind(), envelope.kind),
        ));
    }
    Ok(envelope.items)
}
