use std::fmt;

pub const EXAMINERS_FILE: &str = "examiner_data.dat";
pub const MODULES_FILE: &str = "module_data.dat";
pub const ACTIONS_FILE: &str = "external_examiner_actions.dat";
pub const PAPERS_FILE_SUFFIX: &str = "_examination_papers.dat";

/// Every durable collection the board keeps. Each one maps to exactly one file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PartitionName {
    Examiners,
    Modules,
    Actions,
    Papers(String),
}

impl PartitionName {
    pub fn papers(module_code: impl Into<String>) -> Self {
        Self::Papers(module_code.into())
    }

    /// Entity kind stored in the partition, written into the envelope header.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Examiners => "examiners",
            Self::Modules => "modules",
            Self::Actions => "actions",
            Self::Papers(_) => "papers",
        }
    }

    pub fn file_name(&self) -> String {
        match self {
            Self::Examiners => EXAMINERS_FILE.to_string(),
            Self::Modules => MODULES_FILE.to_string(),
            Self::Actions => ACTIONS_FILE.to_string(),
            Self::Papers(module_code) => format!("{}{}", module_code, PAPERS_FILE_SUFFIX),
        }
    }
}

impl fmt::Display for PartitionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Papers(module_code) => write!(f, "papers:{}", module_code),
            other => write!(f, "{}", other.kind()),
        }
    }
}
