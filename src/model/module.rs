use crate::core::{BoardError, Result};
use crate::model::examiner::{ExternalExaminer, InternalExaminer};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

lazy_static! {
    // Module codes become part of a partition file name.
    static ref MODULE_CODE: Regex = Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_-]{0,31}$").unwrap();
}

pub fn validate_module_code(code: &str) -> Result<()> {
    if MODULE_CODE.is_match(code) {
        Ok(())
    } else {
        Err(BoardError::validation(format!(
            "Invalid module code '{}': use 1-32 letters, digits, '-' or '_'",
            code
        )))
    }
}

/// A taught module together with value copies of its two examiners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub code: String,
    pub title: String,
    pub registrations: u32,
    pub program_code: String,
    pub program_title: String,
    pub year: u16,
    pub school: String,
    pub department: String,
    pub internal_examiner: InternalExaminer,
    pub external_examiner: ExternalExaminer,
}

/// Field values for a new module; examiners are referenced by id and
/// resolved against the examiner registry when the module is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDraft {
    pub code: String,
    pub title: String,
    pub registrations: u32,
    pub program_code: String,
    pub program_title: String,
    pub year: u16,
    pub school: String,
    pub department: String,
    pub internal_examiner_id: Uuid,
    pub external_examiner_id: Uuid,
}

impl ModuleDraft {
    pub fn into_module(
        self,
        internal_examiner: InternalExaminer,
        external_examiner: ExternalExaminer,
    ) -> Module {
        Module {
            code: self.code,
            title: self.title,
            registrations: self.registrations,
            program_code: self.program_code,
            program_title: self.program_title,
            year: self.year,
            school: self.school,
            department: self.department,
            internal_examiner,
            external_examiner,
        }
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Module Info:")?;
        writeln!(f, "  Module Code: {}", self.code)?;
        writeln!(f, "  Module Title: {}", self.title)?;
        writeln!(f, "  Registrations: {}", self.registrations)?;
        writeln!(f, "  Program Code: {}", self.program_code)?;
        writeln!(f, "  Program Title: {}", self.program_title)?;
        writeln!(f, "  Year: {}", self.year)?;
        writeln!(f, "  School: {}", self.school)?;
        writeln!(f, "  Department: {}", self.department)?;
        writeln!(f, "  Internal Examiner: {} ({})", self.internal_examiner.name, self.internal_examiner.id)?;
        writeln!(f, "  External Examiner: {} ({})", self.external_examiner.name, self.external_examiner.id)
    }
}
