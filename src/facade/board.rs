use crate::actions::ActionLog;
use crate::config::StoreConfig;
use crate::core::{BoardError, ExamRules, Result};
use crate::directory::{ExaminerRegistry, ModuleDirectory};
use crate::model::{
    ActionKind, Examiner, ExaminerAction, ExaminerDraft, ExaminerKind, ExaminationPaper, Module,
    ModuleDraft, PaperDraft, validate_module_code,
};
use crate::papers::PaperPartitionManager;
use crate::storage::{DurabilityMode, FileBackend, MemoryBackend, PartitionBackend, PartitionStore};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Which papers to list. No module means every module in the directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaperFilter {
    pub module_code: Option<String>,
}

impl PaperFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_module(mut self, module_code: impl Into<String>) -> Self {
        self.module_code = Some(module_code.into());
        self
    }
}

/// A workflow's selection for a new examiner action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRequest {
    pub module_code: String,
    pub paper_id: Uuid,
    pub examiner_id: Uuid,
    pub kind: ActionKind,
    pub comment: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub modules_scanned: usize,
    pub papers_repaired: usize,
}

/// Main entry point for the record store.
///
/// Every operation reloads the partitions it needs; an `ExamBoard` keeps no
/// entity state between calls, so two boards over the same data directory
/// see each other's writes (but must not run concurrently, writes are
/// last-writer-wins per partition).
///
/// # Examples
///
/// ```
/// use exam_board::ExamBoard;
/// use exam_board::model::ExaminerDraft;
///
/// # fn main() -> exam_board::Result<()> {
/// let board = ExamBoard::in_memory();
/// let bob = board.create_examiner(ExaminerDraft::External {
///     name: "Bob".to_string(),
///     department: "Computing".to_string(),
///     institution: "UCD".to_string(),
/// })?;
/// assert_eq!(board.list_examiners()?, vec![bob]);
/// # Ok(())
/// # }
/// ```
pub struct ExamBoard {
    config: StoreConfig,
    examiners: ExaminerRegistry,
    modules: ModuleDirectory,
    papers: PaperPartitionManager,
    actions: ActionLog,
}

impl ExamBoard {
    /// Open a board over the partitions described by `config`.
    pub fn open(config: StoreConfig) -> Result<Self> {
        let backend: Arc<dyn PartitionBackend> = match config.durability {
            DurabilityMode::None => Arc::new(MemoryBackend::new()),
            mode => {
                if config.data_dir.exists() && !config.data_dir.is_dir() {
                    return Err(BoardError::Config(format!(
                        "Data directory '{}' is not a directory",
                        config.data_dir.display()
                    )));
                }
                Arc::new(FileBackend::new(&config.data_dir, mode))
            }
        };
        info!(backend = %backend.describe(), "opening exam board");
        Ok(Self::with_backend(backend, config))
    }

    pub fn in_memory() -> Self {
        Self::with_backend(Arc::new(MemoryBackend::new()), StoreConfig::in_memory())
    }

    pub fn with_backend(backend: Arc<dyn PartitionBackend>, config: StoreConfig) -> Self {
        let store = PartitionStore::new(backend);
        let papers = PaperPartitionManager::new(store.clone(), config.rules);
        Self {
            examiners: ExaminerRegistry::new(store.clone()),
            modules: ModuleDirectory::new(store.clone()),
            actions: ActionLog::new(store, papers.clone()),
            papers,
            config,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn rules(&self) -> &ExamRules {
        &self.config.rules
    }

    // Examiners

    pub fn create_examiner(&self, draft: ExaminerDraft) -> Result<Examiner> {
        self.examiners.create(draft)
    }

    pub fn list_examiners(&self) -> Result<Vec<Examiner>> {
        self.examiners.list()
    }

    pub fn list_examiners_of_kind(&self, kind: ExaminerKind) -> Result<Vec<Examiner>> {
        self.examiners.list_of_kind(kind)
    }

    pub fn get_examiner(&self, id: Uuid) -> Result<Option<Examiner>> {
        self.examiners.get(id)
    }

    // Modules

    /// Register a module, copying the referenced examiners into it.
    pub fn create_module(&self, draft: ModuleDraft) -> Result<Module> {
        validate_module_code(&draft.code)?;
        if self.modules.is_code_taken(&draft.code)? {
            return Err(BoardError::AlreadyExists(format!("Module '{}'", draft.code)));
        }
        let internal = self.examiners.require_internal(draft.internal_examiner_id)?;
        let external = self.examiners.require_external(draft.external_examiner_id)?;
        self.modules.register(draft.into_module(internal, external))
    }

    pub fn list_modules(&self) -> Result<Vec<Module>> {
        self.modules.list()
    }

    pub fn get_module(&self, code: &str) -> Result<Option<Module>> {
        self.modules.resolve_module(code)
    }

    // Papers

    pub fn create_paper(&self, module_code: &str, draft: PaperDraft) -> Result<ExaminationPaper> {
        self.modules.require(module_code)?;
        self.papers.create_paper(module_code, draft)
    }

    pub fn list_papers(&self, filter: &PaperFilter) -> Result<Vec<ExaminationPaper>> {
        match &filter.module_code {
            Some(module_code) => self.papers.list_papers(module_code),
            None => {
                let mut papers = Vec::new();
                for module in self.modules.list()? {
                    papers.extend(self.papers.list_papers(&module.code)?);
                }
                Ok(papers)
            }
        }
    }

    pub fn get_paper(&self, module_code: &str, paper_id: Uuid) -> Result<Option<ExaminationPaper>> {
        self.papers.find_paper_by_id(module_code, paper_id)
    }

    /// Papers of every module the external examiner is assigned to.
    pub fn papers_for_examiner(&self, examiner_id: Uuid) -> Result<Vec<ExaminationPaper>> {
        let examiner = self.examiners.require_external(examiner_id)?;
        let mut papers = Vec::new();
        for module_code in self.modules.find_modules_for_examiner(&examiner)? {
            papers.extend(self.papers.list_papers(&module_code)?);
        }
        Ok(papers)
    }

    // Actions

    /// Record an external examiner's action. The examiner must be the
    /// module's assigned external examiner and the paper must exist in the
    /// module's partition; otherwise nothing is written.
    pub fn record_action(&self, request: ActionRequest) -> Result<ExaminerAction> {
        let examiner = self.examiners.require_external(request.examiner_id)?;
        let module = self.modules.require(&request.module_code)?;
        if module.external_examiner != examiner {
            return Err(BoardError::validation(format!(
                "Examiner '{}' is not the external examiner for module '{}'",
                examiner.name, module.code
            )));
        }

        let action = ExaminerAction::new(
            &module.code,
            examiner,
            request.comment,
            request.kind,
            request.paper_id,
        );
        self.actions.record_action(request.paper_id, &module.code, action)
    }

    pub fn list_actions_for_paper(&self, paper_id: Uuid) -> Result<Vec<ExaminerAction>> {
        self.actions.list_actions_for_paper(paper_id)
    }

    pub fn list_actions_for_module(&self, module_code: &str) -> Result<Vec<ExaminerAction>> {
        self.actions.list_actions_for_module(module_code)
    }

    pub fn list_actions_for_examiner(&self, examiner_id: Uuid) -> Result<Vec<ExaminerAction>> {
        self.actions.list_actions_for_examiner(examiner_id)
    }

    pub fn list_all_actions(&self) -> Result<Vec<ExaminerAction>> {
        self.actions.list_all()
    }

    pub fn actions_grouped_by_paper(&self) -> Result<Vec<(Uuid, Vec<ExaminerAction>)>> {
        self.actions.grouped_by_paper()
    }

    /// Rebuild every paper's embedded action list from the global log.
    pub fn reconcile(&self) -> Result<ReconcileReport> {
        let index = self.actions.load_index()?;
        let mut report = ReconcileReport::default();
        for module in self.modules.list()? {
            report.modules_scanned += 1;
            let papers = self.papers.list_papers(&module.code)?;
            if papers.is_empty() {
                continue;
            }
            report.papers_repaired += self.actions.reconcile_papers(&module.code, papers, &index)?;
        }
        info!(
            modules = report.modules_scanned,
            repaired = report.papers_repaired,
            "reconciliation finished"
        );
        Ok(report)
    }
}
