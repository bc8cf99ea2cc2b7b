pub mod action;
pub mod examiner;
pub mod module;
pub mod paper;

pub use action::{ActionKind, ExaminerAction};
pub use examiner::{Examiner, ExaminerDraft, ExaminerKind, ExternalExaminer, InternalExaminer};
pub use module::{Module, ModuleDraft, validate_module_code};
pub use paper::{AllowedMaterials, ExaminationPaper, PaperDraft, Question, QuestionPart};
