use crate::core::{BoardError, ExamRules, Result};
use crate::model::action::ExaminerAction;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Materials a candidate may bring into the examination hall.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowedMaterials {
    pub log_tables: bool,
    pub actuarial_tables: bool,
    pub statistical_tables: bool,
    pub graph_paper: bool,
    pub dictionaries: bool,
    pub attached_answer_sheet: bool,
    pub thermodynamic_tables: bool,
    pub non_programmable_calculators: bool,
    pub rate_tables: bool,
}

impl AllowedMaterials {
    pub fn entries(&self) -> [(&'static str, bool); 9] {
        [
            ("Log Tables", self.log_tables),
            ("Actuarial Tables", self.actuarial_tables),
            ("Statistical Tables", self.statistical_tables),
            ("Graph Paper", self.graph_paper),
            ("Dictionaries", self.dictionaries),
            ("Attached Answer Sheet", self.attached_answer_sheet),
            ("Thermodynamic Tables", self.thermodynamic_tables),
            ("Non-Programmable Calculators", self.non_programmable_calculators),
            ("Rate Tables", self.rate_tables),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionPart {
    pub text: String,
    pub marks: u32,
}

impl QuestionPart {
    pub fn new(text: impl Into<String>, marks: u32) -> Self {
        Self {
            text: text.into(),
            marks,
        }
    }
}

impl fmt::Display for QuestionPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} Marks)", self.text, self.marks)
    }
}

/// A question is identified only by its position within the paper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    pub parts: Vec<QuestionPart>,
    pub marks: u32,
}

impl Question {
    pub fn new(text: impl Into<String>, parts: Vec<QuestionPart>, marks: u32) -> Self {
        Self {
            text: text.into(),
            parts,
            marks,
        }
    }

    /// Sum of the part marks, `None` if it does not fit in a `u32`.
    pub fn assigned_part_marks(&self) -> Option<u32> {
        sum_marks(self.parts.iter().map(|part| part.marks))
    }

    pub fn validate(&self, rules: &ExamRules) -> Result<()> {
        if self.marks == 0 {
            return Err(BoardError::validation("A question must carry at least one mark"));
        }
        if self.marks > rules.total_marks {
            return Err(BoardError::validation(format!(
                "A question may carry at most {} marks, got {}",
                rules.total_marks, self.marks
            )));
        }
        if self.parts.len() < rules.min_parts {
            return Err(BoardError::validation(format!(
                "At least {} part(s) required for each question",
                rules.min_parts
            )));
        }
        if self.parts.len() > rules.max_parts {
            return Err(BoardError::validation(format!(
                "A question may have at most {} parts, got {}",
                rules.max_parts,
                self.parts.len()
            )));
        }
        if let Some(part) = self.parts.iter().find(|part| part.marks > self.marks) {
            return Err(BoardError::validation(format!(
                "Part '{}' carries {} marks, more than the question's {}",
                part.text, part.marks, self.marks
            )));
        }
        let assigned = self
            .assigned_part_marks()
            .ok_or_else(|| BoardError::validation("Part marks overflow"))?;
        if assigned > self.marks {
            return Err(BoardError::validation(format!(
                "Part marks ({}) exceed the question's {} marks",
                assigned, self.marks
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Question Text: {} [{} Marks]", self.text, self.marks)?;
        for (index, part) in self.parts.iter().enumerate() {
            let label = ExamRules::part_label(index).unwrap_or('?');
            writeln!(f, "\t({}) {}", label, part)?;
        }
        Ok(())
    }
}

/// Paper content supplied by a workflow before an id is assigned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperDraft {
    #[serde(default)]
    pub materials: AllowedMaterials,
    pub questions: Vec<Question>,
}

impl PaperDraft {
    /// Sum of the question marks, `None` if it does not fit in a `u32`.
    pub fn total_marks(&self) -> Option<u32> {
        sum_marks(self.questions.iter().map(|question| question.marks))
    }

    /// Checks question count, per-question part limits and the mark total.
    pub fn validate(&self, rules: &ExamRules) -> Result<()> {
        if self.questions.len() < rules.min_questions {
            return Err(BoardError::validation(format!(
                "A paper needs at least {} question(s)",
                rules.min_questions
            )));
        }
        if self.questions.len() > rules.max_questions {
            return Err(BoardError::validation(format!(
                "A paper may have at most {} questions, got {}",
                rules.max_questions,
                self.questions.len()
            )));
        }
        for (index, question) in self.questions.iter().enumerate() {
            question.validate(rules).map_err(|err| match err {
                BoardError::Validation(msg) => {
                    BoardError::Validation(format!("Question {}: {}", index + 1, msg))
                }
                other => other,
            })?;
        }
        let total = self
            .total_marks()
            .ok_or_else(|| BoardError::validation("Question marks overflow"))?;
        if total != rules.total_marks {
            return Err(BoardError::validation(format!(
                "Total marks for all questions must add up to {}, got {}",
                rules.total_marks, total
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExaminationPaper {
    pub paper_id: Uuid,
    pub module_code: String,
    pub materials: AllowedMaterials,
    pub total_questions: u32,
    pub required_answers: u32,
    pub questions: Vec<Question>,
    /// Denormalized copy of this paper's entries in the global action log.
    pub actions: Vec<ExaminerAction>,
}

impl ExaminationPaper {
    pub fn from_draft(
        paper_id: Uuid,
        module_code: impl Into<String>,
        draft: PaperDraft,
        rules: &ExamRules,
    ) -> Self {
        Self {
            paper_id,
            module_code: module_code.into(),
            materials: draft.materials,
            total_questions: draft.questions.len() as u32,
            required_answers: rules.required_answers,
            questions: draft.questions,
            actions: Vec::new(),
        }
    }

    pub fn total_marks(&self) -> Option<u32> {
        sum_marks(self.questions.iter().map(|question| question.marks))
    }

    /// Returns a new record with `action` appended; `self` is left untouched.
    pub fn with_action(&self, action: ExaminerAction) -> Self {
        let mut actions = Vec::with_capacity(self.actions.len() + 1);
        actions.extend(self.actions.iter().cloned());
        actions.push(action);
        self.with_actions(actions)
    }

    pub fn with_actions(&self, actions: Vec<ExaminerAction>) -> Self {
        Self {
            actions,
            ..self.clone()
        }
    }
}

impl fmt::Display for ExaminationPaper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ExaminationPaper:")?;
        writeln!(f, "\tpaperId='{}'", self.paper_id)?;
        writeln!(f, "\tmoduleCode='{}'", self.module_code)?;
        for (label, allowed) in self.materials.entries() {
            writeln!(f, "\tAllow {}: {}", label, if allowed { "Yes" } else { "No" })?;
        }
        writeln!(f, "\ttotalQuestions={}", self.total_questions)?;
        writeln!(f, "\trequiredAnswers={}", self.required_answers)?;
        writeln!(f, "\tquestions=[")?;
        for (index, question) in self.questions.iter().enumerate() {
            write!(f, "\t{}. {}", index + 1, question)?;
        }
        writeln!(f, "\t]")?;
        for action in &self.actions {
            writeln!(f, "\t\t{}", action)?;
        }
        Ok(())
    }
}

fn sum_marks(marks: impl Iterator<Item = u32>) -> Option<u32> {
    marks.fold(Some(0u32), |total, m| total?.checked_add(m))
}
