use crate::model::examiner::ExternalExaminer;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    AddComment,
    Approve,
    Reject,
}

impl ActionKind {
    pub const ALL: [ActionKind; 3] = [Self::AddComment, Self::Approve, Self::Reject];

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "addcomment" | "comment" => Some(Self::AddComment),
            "approve" => Some(Self::Approve),
            "reject" => Some(Self::Reject),
            _ => None,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddComment => write!(f, "ADD_COMMENT"),
            Self::Approve => write!(f, "APPROVE"),
            Self::Reject => write!(f, "REJECT"),
        }
    }
}

/// An external examiner's action on a paper. Never edited once recorded;
/// identified only by paper id and position in the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExaminerAction {
    pub module_code: String,
    pub examiner: ExternalExaminer,
    pub comment: String,
    pub kind: ActionKind,
    pub paper_id: Uuid,
    pub recorded_at: DateTime<Utc>,
}

impl ExaminerAction {
    pub fn new(
        module_code: impl Into<String>,
        examiner: ExternalExaminer,
        comment: impl Into<String>,
        kind: ActionKind,
        paper_id: Uuid,
    ) -> Self {
        Self {
            module_code: module_code.into(),
            examiner,
            comment: comment.into(),
            kind,
            paper_id,
            recorded_at: Utc::now(),
        }
    }
}

impl fmt::Display for ExaminerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Action Details: module={} paper={} examiner={} action={} at={} comment=\"{}\"",
            self.module_code,
            self.paper_id,
            self.examiner.name,
            self.kind,
            self.recorded_at.format("%Y-%m-%d %H:%M:%S"),
            self.comment
        )
    }
}
