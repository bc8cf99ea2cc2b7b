//! Per-module examination paper partitions (`papers:<moduleCode>`).

use crate::core::{BoardError, ExamRules, Result};
use crate::model::{ExaminationPaper, PaperDraft, validate_module_code};
use crate::storage::{PartitionName, PartitionStore};
use tracing::info;
use uuid::Uuid;

#[derive(Clone)]
pub struct PaperPartitionManager {
    store: PartitionStore,
    rules: ExamRules,
}

impl PaperPartitionManager {
    pub fn new(store: PartitionStore, rules: ExamRules) -> Self {
        Self { store, rules }
    }

    pub fn rules(&self) -> &ExamRules {
        &self.rules
    }

    /// Validate `draft`, assign a fresh paper id and append the paper to the
    /// module's partition. Nothing is written if validation fails.
    pub fn create_paper(&self, module_code: &str, draft: PaperDraft) -> Result<ExaminationPaper> {
        validate_module_code(module_code)?;
        draft.validate(&self.rules)?;

        let partition = PartitionName::papers(module_code);
        let mut papers: Vec<ExaminationPaper> = self.store.load(&partition)?;
        let paper = ExaminationPaper::from_draft(Uuid::new_v4(), module_code, draft, &self.rules);
        papers.push(paper.clone());
        self.store.save(&partition, &papers)?;

        info!(module = module_code, paper_id = %paper.paper_id, questions = paper.total_questions, "examination paper created");
        Ok(paper)
    }

    pub fn list_papers(&self, module_code: &str) -> Result<Vec<ExaminationPaper>> {
        validate_module_code(module_code)?;
        self.store.load(&PartitionName::papers(module_code))
    }

    pub fn find_paper_by_id(
        &self,
        module_code: &str,
        paper_id: Uuid,
    ) -> Result<Option<ExaminationPaper>> {
        Ok(self
            .list_papers(module_code)?
            .into_iter()
            .find(|paper| paper.paper_id == paper_id))
    }

    /// Swap the stored paper with the same id for `updated`, keeping its position.
    pub fn replace_paper(&self, module_code: &str, updated: ExaminationPaper) -> Result<()> {
        if updated.module_code != module_code {
            return Err(BoardError::validation(format!(
                "Paper '{}' belongs to module '{}', not '{}'",
                updated.paper_id, updated.module_code, module_code
            )));
        }
        let mut papers = self.load_existing_partition(module_code)?;
        let position = position_of(&papers, updated.paper_id).ok_or_else(|| {
            BoardError::not_found(format!(
                "Paper '{}' in module '{}'",
                updated.paper_id, module_code
            ))
        })?;
        papers[position] = updated;
        self.save_partition(module_code, &papers)
    }

    /// Load a module's partition that is expected to exist already.
    pub(crate) fn load_existing_partition(&self, module_code: &str) -> Result<Vec<ExaminationPaper>> {
        validate_module_code(module_code)?;
        self.store
            .load_existing(&PartitionName::papers(module_code))?
            .ok_or_else(|| {
                BoardError::not_found(format!("Examination papers for module '{}'", module_code))
            })
    }

    pub(crate) fn save_partition(&self, module_code: &str, papers: &[ExaminationPaper]) -> Result<()> {
        self.store.save(&PartitionName::papers(module_code), papers)
    }
}

pub(crate) fn position_of(papers: &[ExaminationPaper], paper_id: Uuid) -> Option<usize> {
    papers.iter().position(|paper| paper.paper_id == paper_id)
}
