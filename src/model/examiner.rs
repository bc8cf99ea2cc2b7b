//! Examiner records.
//!
//! Examiners are immutable once created. Each one carries a surrogate `id`
//! assigned at creation so two examiners sharing a name stay distinguishable
//! wherever a module embeds a copy of them.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExaminerKind {
    Internal,
    External,
}

impl ExaminerKind {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "internal" | "int" | "i" => Some(Self::Internal),
            "external" | "ext" | "e" => Some(Self::External),
            _ => None,
        }
    }
}

impl fmt::Display for ExaminerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Internal => write!(f, "INTERNAL"),
            Self::External => write!(f, "EXTERNAL"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternalExaminer {
    pub id: Uuid,
    pub name: String,
    pub department: String,
    pub school: String,
    pub email: String,
    pub registration_number: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalExaminer {
    pub id: Uuid,
    pub name: String,
    pub department: String,
    pub institution: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Examiner {
    Internal(InternalExaminer),
    External(ExternalExaminer),
}

impl Examiner {
    pub fn id(&self) -> Uuid {
        match self {
            Self::Internal(examiner) => examiner.id,
            Self::External(examiner) => examiner.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Internal(examiner) => &examiner.name,
            Self::External(examiner) => &examiner.name,
        }
    }

    pub fn department(&self) -> &str {
        match self {
            Self::Internal(examiner) => &examiner.department,
            Self::External(examiner) => &examiner.department,
        }
    }

    pub fn kind(&self) -> ExaminerKind {
        match self {
            Self::Internal(_) => ExaminerKind::Internal,
            Self::External(_) => ExaminerKind::External,
        }
    }

    pub fn as_internal(&self) -> Option<&InternalExaminer> {
        match self {
            Self::Internal(examiner) => Some(examiner),
            Self::External(_) => None,
        }
    }

    pub fn as_external(&self) -> Option<&ExternalExaminer> {
        match self {
            Self::External(examiner) => Some(examiner),
            Self::Internal(_) => None,
        }
    }
}

/// Field values for a new examiner; the registry assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExaminerDraft {
    Internal {
        name: String,
        department: String,
        school: String,
        email: String,
        registration_number: u32,
    },
    External {
        name: String,
        department: String,
        institution: String,
    },
}

impl ExaminerDraft {
    pub fn name(&self) -> &str {
        match self {
            Self::Internal { name, .. } | Self::External { name, .. } => name,
        }
    }

    pub fn into_examiner(self, id: Uuid) -> Examiner {
        match self {
            Self::Internal {
                name,
                department,
                school,
                email,
                registration_number,
            } => Examiner::Internal(InternalExaminer {
                id,
                name,
                department,
                school,
                email,
                registration_number,
            }),
            Self::External {
                name,
                department,
                institution,
            } => Examiner::External(ExternalExaminer {
                id,
                name,
                department,
                institution,
            }),
        }
    }
}

impl fmt::Display for InternalExaminer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Internal Examiner Details:")?;
        writeln!(f, "    Id: {}", self.id)?;
        writeln!(f, "    Name: {}", self.name)?;
        writeln!(f, "    Department: {}", self.department)?;
        writeln!(f, "    School: {}", self.school)?;
        writeln!(f, "    Email: {}", self.email)?;
        writeln!(f, "    CRN: {}", self.registration_number)
    }
}

impl fmt::Display for ExternalExaminer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "External Examiner Details:")?;
        writeln!(f, "    Id: {}", self.id)?;
        writeln!(f, "    Name: {}", self.name)?;
        writeln!(f, "    Department: {}", self.department)?;
        writeln!(f, "    Institution: {}", self.institution)
    }
}

impl fmt::Display for Examiner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Internal(examiner) => examiner.fmt(f),
            Self::External(examiner) => examiner.fmt(f),
        }
    }
}
