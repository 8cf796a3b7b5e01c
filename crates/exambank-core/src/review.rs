//! Operator review of a parsed batch.
//!
//! Records flagged `needs_review` are edited in place. Leaving edit mode
//! re-runs validation; [`ReviewSession::force_done`] is the only way to clear
//! the flag on an incomplete record, and it is logged.

use tracing::{info, warn};

use crate::error::ReviewError;
use crate::model::{ParsedQuestion, OPTION_COUNT};
use crate::validate::{validate, ValidationIssue};

/// A change to a single field of a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    QuestionText(String),
    /// Replace the option at `index` (0 = A).
    Option { index: usize, value: String },
    Answer(usize),
    Topic(String),
    Subject(String),
    Level(String),
    Image(Option<String>),
}

/// Outcome of leaving edit mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewStatus {
    Complete,
    Incomplete(Vec<ValidationIssue>),
}

/// A batch of questions under review.
#[derive(Debug, Clone, Default)]
pub struct ReviewSession {
    questions: Vec<ParsedQuestion>,
}

impl ReviewSession {
    pub fn new(questions: Vec<ParsedQuestion>) -> Self {
        Self { questions }
    }

    pub fn questions(&self) -> &[ParsedQuestion] {
        &self.questions
    }

    pub fn into_questions(self) -> Vec<ParsedQuestion> {
        self.questions
    }

    pub fn get(&self, index: usize) -> Result<&ParsedQuestion, ReviewError> {
        let len = self.questions.len();
        self.questions
            .get(index)
            .ok_or(ReviewError::NoSuchQuestion { index, len })
    }

    fn get_mut(&mut self, index: usize) -> Result<&mut ParsedQuestion, ReviewError> {
        let len = self.questions.len();
        self.questions
            .get_mut(index)
            .ok_or(ReviewError::NoSuchQuestion { index, len })
    }

    /// Put a record into edit mode.
    pub fn start_editing(&mut self, index: usize) -> Result<(), ReviewError> {
        self.get_mut(index)?.needs_review = true;
        Ok(())
    }

    /// Apply an edit. The record stays in edit mode until finished.
    pub fn edit(&mut self, index: usize, edit: Edit) -> Result<(), ReviewError> {
        let question = self.get_mut(index)?;

        match edit {
            Edit::QuestionText(text) => question.question_text = text,
            Edit::Option { index: slot, value } => {
                if slot >= OPTION_COUNT {
                    return Err(ReviewError::OptionOutOfRange(slot));
                }
                if question.options.len() < OPTION_COUNT {
                    question.options.resize(OPTION_COUNT, String::new());
                }
                question.options[slot] = value;
            }
            Edit::Answer(answer) => {
                if answer >= question.options.len() {
                    return Err(ReviewError::AnswerOutOfRange {
                        index: answer,
                        options: question.options.len(),
                    });
                }
                question.answer_index = answer;
            }
            Edit::Topic(topic) => question.topic = topic,
            Edit::Subject(subject) => question.subject = subject,
            Edit::Level(level) => question.level = vec![level],
            Edit::Image(image) => question.image = image,
        }

        question.needs_review = true;
        Ok(())
    }

    /// Leave edit mode. The flag is cleared only if the record validates.
    pub fn finish_editing(&mut self, index: usize) -> Result<ReviewStatus, ReviewError> {
        let question = self.get_mut(index)?;
        let issues = validate(question);
        if issues.is_empty() {
            question.needs_review = false;
            Ok(ReviewStatus::Complete)
        } else {
            question.needs_review = true;
            Ok(ReviewStatus::Incomplete(issues))
        }
    }

    /// Clear the review flag even if validation fails; logs a warning when it does.
    pub fn force_done(&mut self, index: usize) -> Result<(), ReviewError> {
        let question = self.get_mut(index)?;
        let issues = validate(question);
        if !issues.is_empty() {
            warn!(
                index,
                issues = issues.len(),
                "review override: marking incomplete question as done"
            );
        }
        question.needs_review = false;
        Ok(())
    }

    /// Indices of records still flagged for review.
    pub fn pending(&self) -> Vec<usize> {
        self.questions
            .iter()
            .enumerate()
            .filter(|(_, q)| q.needs_review)
            .map(|(i, _)| i)
            .collect()
    }

    /// Re-validate every record before submission.
    pub fn ensure_submittable(&self) -> Result<(), ReviewError> {
        let count = self
            .questions
            .iter()
            .filter(|q| !validate(q).is_empty())
            .count();
        if count > 0 {
            return Err(ReviewError::Incomplete { count });
        }
        info!(questions = self.questions.len(), "batch ready for submission");
        Ok(())
    }
}
