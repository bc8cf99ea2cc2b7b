//! End-to-end tests for the exam board over on-disk and in-memory partitions

use exam_board::storage::{MemoryBackend, PartitionBackend};
use exam_board::{
    ActionKind, ActionRequest, AllowedMaterials, BoardError, DurabilityMode, ExamBoard, Examiner,
    ExaminerDraft, ModuleDraft, PaperDraft, PaperFilter, Question, QuestionPart, StoreConfig,
};
use std::fs;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use uuid::Uuid;

fn open(dir: &TempDir) -> ExamBoard {
    ExamBoard::open(StoreConfig::new(dir.path()).durability(DurabilityMode::Sync)).unwrap()
}

fn alice() -> ExaminerDraft {
    ExaminerDraft::Internal {
        name: "Alice".to_string(),
        department: "Computing".to_string(),
        school: "Science".to_string(),
        email: "alice@example.ie".to_string(),
        registration_number: 1001,
    }
}

fn bob() -> ExaminerDraft {
    ExaminerDraft::External {
        name: "Bob".to_string(),
        department: "Computing".to_string(),
        institution: "Other University".to_string(),
    }
}

fn module_draft(code: &str, internal: &Examiner, external: &Examiner) -> ModuleDraft {
    ModuleDraft {
        code: code.to_string(),
        title: "Intro to Programming".to_string(),
        registrations: 120,
        program_code: "BSC-CS".to_string(),
        program_title: "Computer Science".to_string(),
        year: 1,
        school: "Science".to_string(),
        department: "Computing".to_string(),
        internal_examiner_id: internal.id(),
        external_examiner_id: external.id(),
    }
}

fn single_question_paper() -> PaperDraft {
    PaperDraft {
        materials: AllowedMaterials {
            non_programmable_calculators: true,
            ..AllowedMaterials::default()
        },
        questions: vec![Question::new(
            "Explain ownership",
            vec![QuestionPart::new("Define a move", 100)],
            100,
        )],
    }
}

fn approve(module_code: &str, paper_id: Uuid, examiner_id: Uuid) -> ActionRequest {
    ActionRequest {
        module_code: module_code.to_string(),
        paper_id,
        examiner_id,
        kind: ActionKind::Approve,
        comment: "Looks good".to_string(),
    }
}

#[test]
fn test_approval_workflow_end_to_end() {
    let temp_dir = TempDir::new().unwrap();
    let board = open(&temp_dir);

    let alice = board.create_examiner(alice()).unwrap();
    let bob = board.create_examiner(bob()).unwrap();
    board.create_module(module_draft("CS101", &alice, &bob)).unwrap();
    let paper = board.create_paper("CS101", single_question_paper()).unwrap();
    assert_eq!(paper.total_questions, 1);
    assert_eq!(paper.total_marks(), Some(100));

    let action = board.record_action(approve("CS101", paper.paper_id, bob.id())).unwrap();
    assert_eq!(action.kind, ActionKind::Approve);
    assert_eq!(action.comment, "Looks good");

    let stored = board.get_paper("CS101", paper.paper_id).unwrap().unwrap();
    assert_eq!(stored.actions, vec![action.clone()]);
    assert_eq!(board.list_actions_for_paper(paper.paper_id).unwrap(), vec![action]);

    for file in [
        "examiner_data.dat",
        "module_data.dat",
        "CS101_examination_papers.dat",
        "external_examiner_actions.dat",
    ] {
        assert!(temp_dir.path().join(file).exists(), "missing {}", file);
    }
}

#[test]
fn test_records_survive_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let (alice, bob, paper_id) = {
        let board = open(&temp_dir);
        let alice = board.create_examiner(alice()).unwrap();
        let bob = board.create_examiner(bob()).unwrap();
        board.create_module(module_draft("CS101", &alice, &bob)).unwrap();
        let paper = board.create_paper("CS101", single_question_paper()).unwrap();
        board.record_action(approve("CS101", paper.paper_id, bob.id())).unwrap();
        (alice, bob, paper.paper_id)
    };

    let board = open(&temp_dir);
    assert_eq!(board.list_examiners().unwrap(), vec![alice, bob.clone()]);
    let module = board.get_module("CS101").unwrap().unwrap();
    assert_eq!(Some(&module.external_examiner), bob.as_external());

    let papers = board.list_papers(&PaperFilter::new()).unwrap();
    assert_eq!(papers.len(), 1);
    assert_eq!(papers[0].paper_id, paper_id);
    assert!(papers[0].materials.non_programmable_calculators);
    assert_eq!(papers[0].actions.len(), 1);
    assert_eq!(board.list_all_actions().unwrap().len(), 1);
}

#[test]
fn test_unknown_paper_leaves_action_log_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let board = open(&temp_dir);
    let alice = board.create_examiner(alice()).unwrap();
    let bob = board.create_examiner(bob()).unwrap();
    board.create_module(module_draft("CS101", &alice, &bob)).unwrap();
    let paper = board.create_paper("CS101", single_question_paper()).unwrap();
    board.record_action(approve("CS101", paper.paper_id, bob.id())).unwrap();

    let log_path = temp_dir.path().join("external_examiner_actions.dat");
    let papers_path = temp_dir.path().join("CS101_examination_papers.dat");
    let log_before = fs::read(&log_path).unwrap();
    let papers_before = fs::read(&papers_path).unwrap();

    let err = board
        .record_action(approve("CS101", Uuid::new_v4(), bob.id()))
        .unwrap_err();
    assert!(err.is_not_found());

    assert_eq!(fs::read(&log_path).unwrap(), log_before);
    assert_eq!(fs::read(&papers_path).unwrap(), papers_before);
}

#[test]
fn test_module_without_papers_is_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let board = open(&temp_dir);
    let alice = board.create_examiner(alice()).unwrap();
    let bob = board.create_examiner(bob()).unwrap();
    board.create_module(module_draft("CS101", &alice, &bob)).unwrap();

    let err = board
        .record_action(approve("CS101", Uuid::new_v4(), bob.id()))
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(!temp_dir.path().join("external_examiner_actions.dat").exists());
}

#[test]
fn test_corrupt_partition_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let board = open(&temp_dir);
    board.create_examiner(bob()).unwrap();

    fs::write(temp_dir.path().join("examiner_data.dat"), b"not a partition").unwrap();

    match board.list_examiners() {
        Err(BoardError::CorruptPartition { partition, .. }) => assert_eq!(partition, "examiners"),
        other => panic!("expected corrupt partition, got {:?}", other),
    }
    assert!(matches!(
        board.create_examiner(alice()),
        Err(BoardError::CorruptPartition { .. })
    ));
}

#[test]
fn test_invalid_paper_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let board = open(&temp_dir);
    let alice = board.create_examiner(alice()).unwrap();
    let bob = board.create_examiner(bob()).unwrap();
    board.create_module(module_draft("CS101", &alice, &bob)).unwrap();

    let short = PaperDraft {
        materials: AllowedMaterials::default(),
        questions: vec![Question::new("Q1", vec![QuestionPart::new("a", 60)], 60)],
    };
    assert!(matches!(
        board.create_paper("CS101", short),
        Err(BoardError::Validation(_))
    ));
    assert!(!temp_dir.path().join("CS101_examination_papers.dat").exists());
}

#[test]
fn test_find_modules_for_external_examiner() {
    let board = ExamBoard::in_memory();
    let alice = board.create_examiner(alice()).unwrap();
    let bob = board.create_examiner(bob()).unwrap();
    let carol = board
        .create_examiner(ExaminerDraft::External {
            name: "Carol".to_string(),
            department: "Maths".to_string(),
            institution: "Elsewhere".to_string(),
        })
        .unwrap();

    board.create_module(module_draft("CS101", &alice, &bob)).unwrap();
    board.create_module(module_draft("MA101", &alice, &carol)).unwrap();
    board.create_module(module_draft("CS201", &alice, &bob)).unwrap();
    board.create_paper("CS201", single_question_paper()).unwrap();
    board.create_paper("MA101", single_question_paper()).unwrap();

    let papers = board.papers_for_examiner(bob.id()).unwrap();
    assert_eq!(papers.len(), 1);
    assert_eq!(papers[0].module_code, "CS201");

    // Internal examiners are never assigned as external.
    assert!(matches!(
        board.papers_for_examiner(alice.id()),
        Err(BoardError::Validation(_))
    ));
}

#[test]
fn test_actions_grouped_by_paper_in_first_seen_order() {
    let board = ExamBoard::in_memory();
    let alice = board.create_examiner(alice()).unwrap();
    let bob = board.create_examiner(bob()).unwrap();
    board.create_module(module_draft("CS101", &alice, &bob)).unwrap();
    let first = board.create_paper("CS101", single_question_paper()).unwrap();
    let second = board.create_paper("CS101", single_question_paper()).unwrap();

    board
        .record_action(ActionRequest {
            kind: ActionKind::AddComment,
            comment: "Q1 wording".to_string(),
            ..approve("CS101", second.paper_id, bob.id())
        })
        .unwrap();
    board.record_action(approve("CS101", first.paper_id, bob.id())).unwrap();
    board.record_action(approve("CS101", second.paper_id, bob.id())).unwrap();

    let grouped = board.actions_grouped_by_paper().unwrap();
    let ids: Vec<Uuid> = grouped.iter().map(|(id, _)| *id).collect();
    assert_eq!(ids, vec![second.paper_id, first.paper_id]);
    assert_eq!(grouped[0].1.len(), 2);
    assert_eq!(grouped[0].1[0].kind, ActionKind::AddComment);
    assert_eq!(grouped[1].1.len(), 1);
}

/// Memory backend that can be told to reject writes to files with a given suffix.
#[derive(Default)]
struct FlakyBackend {
    inner: MemoryBackend,
    failing_suffix: Mutex<Option<&'static str>>,
}

impl FlakyBackend {
    fn fail_writes_to(&self, suffix: Option<&'static str>) {
        *self.failing_suffix.lock().unwrap() = suffix;
    }
}

impl PartitionBackend for FlakyBackend {
    fn read(&self, file_name: &str) -> exam_board::Result<Option<Vec<u8>>> {
        self.inner.read(file_name)
    }

    fn write(&self, file_name: &str, bytes: &[u8]) -> exam_board::Result<()> {
        let failing = *self.failing_suffix.lock()?;
        if failing.is_some_and(|suffix| file_name.ends_with(suffix)) {
            return Err(BoardError::Io("disk full".to_string()));
        }
        self.inner.write(file_name, bytes)
    }

    fn exists(&self, file_name: &str) -> exam_board::Result<bool> {
        self.inner.exists(file_name)
    }

    fn describe(&self) -> String {
        "flaky".to_string()
    }
}

fn flaky_board() -> (ExamBoard, Arc<FlakyBackend>, Examiner, Uuid) {
    let backend = Arc::new(FlakyBackend::default());
    let board = ExamBoard::with_backend(backend.clone(), StoreConfig::in_memory());
    let alice = board.create_examiner(alice()).unwrap();
    let bob = board.create_examiner(bob()).unwrap();
    board.create_module(module_draft("CS101", &alice, &bob)).unwrap();
    let paper = board.create_paper("CS101", single_question_paper()).unwrap();
    (board, backend, bob, paper.paper_id)
}

#[test]
fn test_failed_log_write_changes_nothing() {
    let (board, backend, bob, paper_id) = flaky_board();
    board.record_action(approve("CS101", paper_id, bob.id())).unwrap();

    let papers_before = backend.inner.read("CS101_examination_papers.dat").unwrap();
    let log_before = backend.inner.read("external_examiner_actions.dat").unwrap();

    backend.fail_writes_to(Some("external_examiner_actions.dat"));
    let err = board
        .record_action(approve("CS101", paper_id, bob.id()))
        .unwrap_err();
    assert!(matches!(err, BoardError::Io(_)));
    backend.fail_writes_to(None);

    assert_eq!(backend.inner.read("CS101_examination_papers.dat").unwrap(), papers_before);
    assert_eq!(backend.inner.read("external_examiner_actions.dat").unwrap(), log_before);
    assert_eq!(board.list_actions_for_paper(paper_id).unwrap().len(), 1);
    assert_eq!(board.reconcile().unwrap().papers_repaired, 0);
}

#[test]
fn test_failed_propagation_is_repaired_by_reconcile() {
    let (board, backend, bob, paper_id) = flaky_board();
    let paper = board.get_paper("CS101", paper_id).unwrap().unwrap();

    backend.fail_writes_to(Some("_examination_papers.dat"));
    let err = board
        .record_action(approve("CS101", paper.paper_id, bob.id()))
        .unwrap_err();
    assert!(matches!(err, BoardError::Io(_)));

    // The log committed, the paper copy lags.
    assert_eq!(board.list_actions_for_paper(paper.paper_id).unwrap().len(), 1);
    let lagging = board.get_paper("CS101", paper.paper_id).unwrap().unwrap();
    assert!(lagging.actions.is_empty());

    backend.fail_writes_to(None);
    let report = board.reconcile().unwrap();
    assert_eq!(report.modules_scanned, 1);
    assert_eq!(report.papers_repaired, 1);

    let repaired = board.get_paper("CS101", paper.paper_id).unwrap().unwrap();
    assert_eq!(repaired.actions, board.list_actions_for_paper(paper.paper_id).unwrap());
    assert_eq!(board.reconcile().unwrap().papers_repaired, 0);
}
