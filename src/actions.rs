//! Global examiner action log and its propagation into paper partitions.
//!
//! The `actions` partition is the system of record. Each paper also embeds
//! a copy of its own actions; [`ActionLog::record_action`] keeps the two in
//! step and [`ActionLog::reconcile_module`] rebuilds embedded copies from the
//! log after a failed or interrupted propagation.
//!
//! `record_action` proceeds in three steps:
//! 1. locate the paper in its module partition; a missing partition or paper
//!    is `NotFound` and nothing is written anywhere
//! 2. append to the log and persist it (the commit point)
//! 3. append to the paper's embedded copy and persist the module partition
//!
//! A failure in step 3 is returned to the caller with the log already
//! committed; the paper copy lags until reconciled.

use crate::core::{BoardError, Result};
use crate::model::{ExaminationPaper, ExaminerAction};
use crate::papers::{PaperPartitionManager, position_of};
use crate::storage::{PartitionName, PartitionStore};
use std::collections::HashMap;
use tracing::{info, warn};
use uuid::Uuid;

/// In-memory view of the log grouped by paper. Rebuilt from the durable
/// partition on every load; never authoritative on its own.
#[derive(Debug, Clone, Default)]
pub struct ActionIndex {
    log: Vec<ExaminerAction>,
    by_paper: HashMap<Uuid, Vec<usize>>,
    paper_order: Vec<Uuid>,
}

impl ActionIndex {
    pub fn from_log(log: Vec<ExaminerAction>) -> Self {
        let mut index = Self::default();
        for action in log {
            index.append(action);
        }
        index
    }

    pub fn append(&mut self, action: ExaminerAction) {
        let position = self.log.len();
        if !self.by_paper.contains_key(&action.paper_id) {
            self.paper_order.push(action.paper_id);
        }
        self.by_paper.entry(action.paper_id).or_default().push(position);
        self.log.push(action);
    }

    /// The full log in global insertion order.
    pub fn log(&self) -> &[ExaminerAction] {
        &self.log
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    pub fn for_paper(&self, paper_id: Uuid) -> Vec<ExaminerAction> {
        self.by_paper
            .get(&paper_id)
            .map(|slots| slots.iter().map(|&i| self.log[i].clone()).collect())
            .unwrap_or_default()
    }

    /// Paper ids in order of their first recorded action.
    pub fn paper_ids(&self) -> &[Uuid] {
        &self.paper_order
    }

    pub fn grouped_by_paper(&self) -> Vec<(Uuid, Vec<ExaminerAction>)> {
        self.paper_order
            .iter()
            .map(|&paper_id| (paper_id, self.for_paper(paper_id)))
            .collect()
    }
}

#[derive(Clone)]
pub struct ActionLog {
    store: PartitionStore,
    papers: PaperPartitionManager,
}

impl ActionLog {
    pub fn new(store: PartitionStore, papers: PaperPartitionManager) -> Self {
        Self { store, papers }
    }

    pub fn load_index(&self) -> Result<ActionIndex> {
        let log: Vec<ExaminerAction> = self.store.load(&PartitionName::Actions)?;
        Ok(ActionIndex::from_log(log))
    }

    pub fn record_action(
        &self,
        paper_id: Uuid,
        module_code: &str,
        action: ExaminerAction,
    ) -> Result<ExaminerAction> {
        if action.paper_id != paper_id || action.module_code != module_code {
            return Err(BoardError::validation(format!(
                "Action targets paper '{}' in module '{}', not paper '{}' in module '{}'",
                action.paper_id, action.module_code, paper_id, module_code
            )));
        }

        let mut papers = self.papers.load_existing_partition(module_code)?;
        let position = position_of(&papers, paper_id).ok_or_else(|| {
            BoardError::not_found(format!("Paper '{}' in module '{}'", paper_id, module_code))
        })?;

        let mut index = self.load_index()?;
        index.append(action.clone());
        self.store.save(&PartitionName::Actions, index.log())?;

        papers[position] = papers[position].with_action(action.clone());
        if let Err(err) = self.papers.save_partition(module_code, &papers) {
            warn!(
                module = module_code,
                paper_id = %paper_id,
                error = %err,
                "action logged but embedded paper copy not updated; reconcile required"
            );
            return Err(err);
        }

        info!(module = module_code, paper_id = %paper_id, kind = %action.kind, examiner = %action.examiner.name, "examiner action recorded");
        Ok(action)
    }

    pub fn list_actions_for_paper(&self, paper_id: Uuid) -> Result<Vec<ExaminerAction>> {
        Ok(self.load_index()?.for_paper(paper_id))
    }

    pub fn list_actions_for_module(&self, module_code: &str) -> Result<Vec<ExaminerAction>> {
        self.filter(|action| action.module_code == module_code)
    }

    pub fn list_actions_for_examiner(&self, examiner_id: Uuid) -> Result<Vec<ExaminerAction>> {
        self.filter(|action| action.examiner.id == examiner_id)
    }

    pub fn list_all(&self) -> Result<Vec<ExaminerAction>> {
        self.store.load(&PartitionName::Actions)
    }

    pub fn grouped_by_paper(&self) -> Result<Vec<(Uuid, Vec<ExaminerAction>)>> {
        Ok(self.load_index()?.grouped_by_paper())
    }

    /// Rewrite every embedded action list in the module's partition that
    /// differs from the log. Returns the number of papers repaired.
    pub fn reconcile_module(&self, module_code: &str) -> Result<usize> {
        let papers = match self.papers.load_existing_partition(module_code) {
            Ok(papers) => papers,
            Err(err) if err.is_not_found() => return Ok(0),
            Err(err) => return Err(err),
        };
        let index = self.load_index()?;
        self.reconcile_papers(module_code, papers, &index)
    }

    pub(crate) fn reconcile_papers(
        &self,
        module_code: &str,
        mut papers: Vec<ExaminationPaper>,
        index: &ActionIndex,
    ) -> Result<usize> {
        let mut repaired = 0;
        for paper in papers.iter_mut() {
            let expected = index.for_paper(paper.paper_id);
            if paper.actions != expected {
                warn!(
                    module = module_code,
                    paper_id = %paper.paper_id,
                    embedded = paper.actions.len(),
                    logged = expected.len(),
                    "embedded actions diverged from log"
                );
                *paper = paper.with_actions(expected);
                repaired += 1;
            }
        }
        if repaired > 0 {
            self.papers.save_partition(module_code, &papers)?;
        }
        Ok(repaired)
    }

    fn filter<F>(&self, predicate: F) -> Result<Vec<ExaminerAction>>
    where
        F: Fn(&ExaminerAction) -> bool,
    {
        Ok(self
            .list_all()?
            .into_iter()
            .filter(|action| predicate(action))
            .collect())
    }
}
