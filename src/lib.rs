// ============================================================================
// Exam Board Record Store
// ============================================================================
//
// Persistent records for examination-paper approval: examiners, modules,
// per-module examination papers and the external examiner action log.
// Each collection is a partition stored as one whole file.

pub mod core;
pub mod storage;
pub mod model;
pub mod directory;
pub mod papers;
pub mod actions;
pub mod config;
pub mod facade;

// Re-export main types for convenience
pub use core::{BoardError, ExamRules, Result};
pub use config::StoreConfig;
pub use facade::{ActionRequest, ExamBoard, PaperFilter, ReconcileReport};
pub use model::{
    ActionKind, AllowedMaterials, Examiner, ExaminerAction, ExaminerDraft, ExaminerKind,
    ExaminationPaper, ExternalExaminer, InternalExaminer, Module, ModuleDraft, PaperDraft,
    Question, QuestionPart,
};
pub use storage::{DurabilityMode, PartitionName};
