use serde::{Deserialize, Serialize};

pub const DEFAULT_MIN_QUESTIONS: usize = 1;
pub const DEFAULT_MAX_QUESTIONS: usize = 6;
pub const DEFAULT_MIN_PARTS: usize = 1;
pub const DEFAULT_MAX_PARTS: usize = 5;
pub const DEFAULT_TOTAL_MARKS: u32 = 100;
pub const DEFAULT_REQUIRED_ANSWERS: u32 = 4;

/// Structural limits every examination paper has to satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamRules {
    pub min_questions: usize,
    pub max_questions: usize,
    pub min_parts: usize,
    pub max_parts: usize,
    pub total_marks: u32,
    pub required_answers: u32,
}

impl Default for ExamRules {
    fn default() -> Self {
        Self {
            min_questions: DEFAULT_MIN_QUESTIONS,
            max_questions: DEFAULT_MAX_QUESTIONS,
            min_parts: DEFAULT_MIN_PARTS,
            max_parts: DEFAULT_MAX_PARTS,
            total_marks: DEFAULT_TOTAL_MARKS,
            required_answers: DEFAULT_REQUIRED_ANSWERS,
        }
    }
}

impl ExamRules {
    /// Part labels run `a..=e`; anything past the fifth part has no label.
    pub fn part_label(index: usize) -> Option<char> {
        const LABELS: [char; DEFAULT_MAX_PARTS] = ['a', 'b', 'c', 'd', 'e'];
        LABELS.get(index).copied()
    }
}
