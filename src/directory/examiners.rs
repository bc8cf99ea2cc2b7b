use crate::core::{BoardError, Result};
use crate::model::{Examiner, ExaminerDraft, ExaminerKind, ExternalExaminer, InternalExaminer};
use crate::storage::{PartitionName, PartitionStore};
use tracing::info;
use uuid::Uuid;

/// Owns the `examiners` partition. Holds no cache: every call reloads.
#[derive(Clone)]
pub struct ExaminerRegistry {
    store: PartitionStore,
}

impl ExaminerRegistry {
    pub fn new(store: PartitionStore) -> Self {
        Self { store }
    }

    pub fn create(&self, draft: ExaminerDraft) -> Result<Examiner> {
        let mut examiners = self.list()?;
        let examiner = draft.into_examiner(Uuid::new_v4());
        examiners.push(examiner.clone());
        self.store.save(&PartitionName::Examiners, &examiners)?;

        info!(id = %examiner.id(), name = examiner.name(), kind = %examiner.kind(), "examiner created");
        Ok(examiner)
    }

    pub fn list(&self) -> Result<Vec<Examiner>> {
        self.store.load(&PartitionName::Examiners)
    }

    pub fn list_of_kind(&self, kind: ExaminerKind) -> Result<Vec<Examiner>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|examiner| examiner.kind() == kind)
            .collect())
    }

    pub fn get(&self, id: Uuid) -> Result<Option<Examiner>> {
        Ok(self.list()?.into_iter().find(|examiner| examiner.id() == id))
    }

    pub fn require(&self, id: Uuid) -> Result<Examiner> {
        self.get(id)?
            .ok_or_else(|| BoardError::not_found(format!("Examiner '{}'", id)))
    }

    pub fn require_internal(&self, id: Uuid) -> Result<InternalExaminer> {
        match self.require(id)? {
            Examiner::Internal(examiner) => Ok(examiner),
            Examiner::External(examiner) => Err(BoardError::validation(format!(
                "Examiner '{}' ({}) is external, an internal examiner is required",
                examiner.name, id
            ))),
        }
    }

    pub fn require_external(&self, id: Uuid) -> Result<ExternalExaminer> {
        match self.require(id)? {
            Examiner::External(examiner) => Ok(examiner),
            Examiner::Internal(examiner) => Err(BoardError::validation(format!(
                "Examiner '{}' ({}) is internal, an external examiner is required",
                examiner.name, id
            ))),
        }
    }
}
