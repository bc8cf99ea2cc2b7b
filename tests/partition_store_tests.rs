//! Integration tests for whole-file partitions on disk

use exam_board::storage::{FileBackend, PartitionStore};
use exam_board::{BoardError, DurabilityMode, PartitionName};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn store(dir: &TempDir, mode: DurabilityMode) -> PartitionStore {
    PartitionStore::new(Arc::new(FileBackend::new(dir.path(), mode)))
}

#[test]
fn test_absent_partition_loads_empty() {
    let temp_dir = TempDir::new().unwrap();
    let store = store(&temp_dir, DurabilityMode::Sync);

    let items: Vec<String> = store.load(&PartitionName::Examiners).unwrap();
    assert!(items.is_empty());
    assert!(!store.exists(&PartitionName::Examiners).unwrap());
    assert!(fs::read_dir(temp_dir.path()).unwrap().next().is_none());
}

#[test]
fn test_module_partitions_are_independent() {
    let temp_dir = TempDir::new().unwrap();
    let store = store(&temp_dir, DurabilityMode::Async);

    store
        .save(&PartitionName::papers("CS101"), &["first".to_string()])
        .unwrap();
    store
        .save(&PartitionName::papers("MA101"), &["second".to_string(), "third".to_string()])
        .unwrap();

    let cs: Vec<String> = store.load(&PartitionName::papers("CS101")).unwrap();
    let ma: Vec<String> = store.load(&PartitionName::papers("MA101")).unwrap();
    assert_eq!(cs, vec!["first"]);
    assert_eq!(ma, vec!["second", "third"]);
    assert!(temp_dir.path().join("CS101_examination_papers.dat").exists());
    assert!(temp_dir.path().join("MA101_examination_papers.dat").exists());
}

#[test]
fn test_save_replaces_previous_contents() {
    let temp_dir = TempDir::new().unwrap();
    let store = store(&temp_dir, DurabilityMode::Sync);

    store.save(&PartitionName::Modules, &[1u32, 2, 3]).unwrap();
    store.save(&PartitionName::Modules, &[4u32]).unwrap();

    let reopened = self::store(&temp_dir, DurabilityMode::Sync);
    let items: Vec<u32> = reopened.load(&PartitionName::Modules).unwrap();
    assert_eq!(items, vec![4]);
}

#[test]
fn test_truncated_partition_is_corrupt() {
    let temp_dir = TempDir::new().unwrap();
    let store = store(&temp_dir, DurabilityMode::Sync);
    store
        .save(&PartitionName::Actions, &["a".to_string(), "b".to_string()])
        .unwrap();

    let path = temp_dir.path().join("external_examiner_actions.dat");
    let bytes = fs::read(&path).unwrap();
    fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();

    let result: exam_board::Result<Vec<String>> = store.load(&PartitionName::Actions);
    match result {
        Err(BoardError::CorruptPartition { partition, .. }) => assert_eq!(partition, "actions"),
        other => panic!("expected corrupt partition, got {:?}", other),
    }
}
