//! Completeness rules for parsed questions.

use thiserror::Error;

use crate::model::{OptionLetter, ParsedQuestion, OPTION_COUNT};

/// A reason a question is not ready for submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationIssue {
    #[error("question text is empty")]
    EmptyQuestion,

    #[error("expected {expected} options, found {0}", expected = OPTION_COUNT)]
    WrongOptionCount(usize),

    #[error("option {0} is empty")]
    EmptyOption(OptionLetter),

    #[error("answer index {0} does not point at an option")]
    AnswerOutOfRange(usize),

    #[error("topic is missing")]
    MissingTopic,

    #[error("subject is missing")]
    MissingSubject,

    #[error("level is missing")]
    MissingLevel,
}

/// Whitespace-only text counts as missing.
fn blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// List everything that keeps `question` from being complete.
pub fn validate(question: &ParsedQuestion) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if blank(&question.question_text) {
        issues.push(ValidationIssue::EmptyQuestion);
    }

    if question.options.len() != OPTION_COUNT {
        issues.push(ValidationIssue::WrongOptionCount(question.options.len()));
    }
    for (i, option) in question.options.iter().enumerate() {
        if blank(option) {
            if let Some(letter) = OptionLetter::from_index(i) {
                issues.push(ValidationIssue::EmptyOption(letter));
            }
        }
    }

    if question.answer_index >= question.options.len() {
        issues.push(ValidationIssue::AnswerOutOfRange(question.answer_index));
    }

    if blank(&question.topic) {
        issues.push(ValidationIssue::MissingTopic);
    }
    if blank(&question.subject) {
        issues.push(ValidationIssue::MissingSubject);
    }
    if question.level.is_empty() || question.level.iter().any(|l| blank(l)) {
        issues.push(ValidationIssue::MissingLevel);
    }

    issues
}

/// `true` when the question has no validation issues.
pub fn is_valid(question: &ParsedQuestion) -> bool {
    validate(question).is_empty()
}
