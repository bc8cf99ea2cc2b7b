pub mod error;
pub mod rules;

pub use error::{BoardError, Result};
pub use rules::ExamRules;
