//! Core data model types for exambank.
//!
//! These are the records produced by the bulk parser, edited during review and
//! exported or submitted to the platform.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ImportError;

/// Number of options a complete multiple-choice question carries.
pub const OPTION_COUNT: usize = 4;

/// Subjects offered by the platform when nothing else is configured.
pub const DEFAULT_SUBJECTS: &[&str] = &["Mathematics", "English", "Physics", "Chemistry", "Biology"];

/// Class levels offered by the platform when nothing else is configured.
pub const DEFAULT_LEVELS: &[&str] = &["Form 1", "Form 2", "Form 3", "Form 4"];

/// A multiple-choice question reconstructed from a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedQuestion {
    /// The prompt.
    pub question_text: String,
    /// Option texts; index 0..3 maps to letters A..D.
    pub options: Vec<String>,
    /// Index into `options` of the correct choice.
    pub answer_index: usize,
    /// Topic tag parsed from the `T.` line.
    #[serde(default)]
    pub topic: String,
    /// Subject from the batch context.
    pub subject: String,
    /// The batch level, stored as a one-element list.
    pub level: Vec<String>,
    /// Whether the record still needs operator attention.
    #[serde(default)]
    pub needs_review: bool,
    /// Optional illustration URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl ParsedQuestion {
    /// A blank record pre-filled from the batch context.
    pub fn new(question_text: impl Into<String>, ctx: &BatchContext) -> Self {
        Self {
            question_text: question_text.into(),
            options: Vec::new(),
            answer_index: 0,
            topic: String::new(),
            subject: ctx.subject.clone(),
            level: vec![ctx.level.clone()],
            needs_review: false,
            image: None,
        }
    }

    /// The option text for a letter, if that slot exists.
    pub fn option(&self, letter: OptionLetter) -> Option<&str> {
        self.options.get(letter.index()).map(String::as_str)
    }
}

/// The subject/level pair selected once per document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchContext {
    pub subject: String,
    pub level: String,
}

impl BatchContext {
    /// Build a context; both values must be non-blank.
    pub fn new(subject: impl Into<String>, level: impl Into<String>) -> Result<Self, ImportError> {
        let subject = subject.into().trim().to_string();
        let level = level.into().trim().to_string();
        if subject.is_empty() || level.is_empty() {
            return Err(ImportError::MissingBatchContext);
        }
        Ok(Self { subject, level })
    }
}

/// Option letters recognised by the bulk format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OptionLetter {
    A,
    B,
    C,
    D,
}

impl OptionLetter {
    pub const ALL: [OptionLetter; OPTION_COUNT] =
        [OptionLetter::A, OptionLetter::B, OptionLetter::C, OptionLetter::D];

    /// Position of this letter in the options list.
    pub fn index(self) -> usize {
        match self {
            OptionLetter::A => 0,
            OptionLetter::B => 1,
            OptionLetter::C => 2,
            OptionLetter::D => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Uppercase only; lowercase letters are not options in the bulk format.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'A' => Some(OptionLetter::A),
            'B' => Some(OptionLetter::B),
            'C' => Some(OptionLetter::C),
            'D' => Some(OptionLetter::D),
            _ => None,
        }
    }
}

impl fmt::Display for OptionLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            OptionLetter::A => 'A',
            OptionLetter::B => 'B',
            OptionLetter::C => 'C',
            OptionLetter::D => 'D',
        };
        write!(f, "{c}")
    }
}

impl FromStr for OptionLetter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c.to_ascii_uppercase())
                .ok_or_else(|| format!("unknown option letter: {s}")),
            _ => Err(format!("unknown option letter: {s}")),
        }
    }
}

/// A student on a class roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub full_name: String,
    pub matricule: String,
    #[serde(default)]
    pub score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_letter_display_and_parse() {
        assert_eq!(OptionLetter::A.to_string(), "A");
        assert_eq!("b".parse::<OptionLetter>().unwrap(), OptionLetter::B);
        assert_eq!(" D ".parse::<OptionLetter>().unwrap(), OptionLetter::D);
        assert!("E".parse::<OptionLetter>().is_err());
        assert!("AB".parse::<OptionLetter>().is_err());
        assert_eq!(OptionLetter::from_char('a'), None);
        assert_eq!(OptionLetter::from_index(2), Some(OptionLetter::C));
        assert_eq!(OptionLetter::from_index(4), None);
    }

    #[test]
    fn batch_context_requires_both_values() {
        assert!(BatchContext::new("Mathematics", "Form 1").is_ok());
        assert!(matches!(
            BatchContext::new("", "Form 1"),
            Err(ImportError::MissingBatchContext)
        ));
        assert!(matches!(
            BatchContext::new("Physics", "   "),
            Err(ImportError::MissingBatchContext)
        ));
    }

    #[test]
    fn question_serializes_with_camel_case_keys() {
        let ctx = BatchContext::new("Biology", "Form 2").unwrap();
        let mut q = ParsedQuestion::new("What is a cell?", &ctx);
        q.options = vec!["a".into(), "b".into(), "c".into(), "d".into()];
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["questionText"], "What is a cell?");
        assert_eq!(json["answerIndex"], 0);
        assert_eq!(json["level"], serde_json::json!(["Form 2"]));
        assert_eq!(json["needsReview"], false);
        assert!(json.get("image").is_none());
    }
}
