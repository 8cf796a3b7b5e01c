//! Line classifier for the bulk question format.
//!
//! ```text
//! 1. What is 2+2?
//! A. 3
//! B. 4*
//! C. 5
//! D. 6
//! T. Arithmetic
//! ```
//!
//! A numbered line opens a question, `T.` sets its topic and `A.`..`D.` fill
//! its options. A trailing `*` marks the correct option.

use crate::model::OptionLetter;

/// Marker appended to the correct option's text.
pub const ANSWER_MARKER: char = '*';

/// What a single line of a bulk document means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `N. text` opens a new question.
    QuestionStart { text: &'a str },
    /// `T. text` sets the topic of the current question.
    Topic { text: &'a str },
    /// `A. text` .. `D. text`; `is_correct` when the text carried the marker.
    Option {
        letter: OptionLetter,
        text: &'a str,
        is_correct: bool,
    },
    /// Anything else. Ignored.
    Other,
}

/// Classify one trimmed, non-empty line.
pub fn classify_line(line: &str) -> LineKind<'_> {
    if let Some(text) = question_start(line) {
        return LineKind::QuestionStart { text };
    }

    if let Some(rest) = line.strip_prefix("T.") {
        return LineKind::Topic { text: rest.trim() };
    }

    if let Some((letter, text)) = option_line(line) {
        let (text, is_correct) = match text.strip_suffix(ANSWER_MARKER) {
            Some(stripped) => (stripped.trim(), true),
            None => (text, false),
        };
        return LineKind::Option {
            letter,
            text,
            is_correct,
        };
    }

    LineKind::Other
}

/// `<digits>.<whitespace><text>`
fn question_start(line: &str) -> Option<&str> {
    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    after_dot(&line[digits..])
}

/// `<A-D>.<whitespace><text>`
fn option_line(line: &str) -> Option<(OptionLetter, &str)> {
    let mut chars = line.chars();
    let letter = OptionLetter::from_char(chars.next()?)?;
    let text = after_dot(chars.as_str())?;
    Some((letter, text))
}

/// Strip a leading `.` that is followed by whitespace and a non-empty payload.
fn after_dot(rest: &str) -> Option<&str> {
    let rest = rest.strip_prefix('.')?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let text = rest.trim();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
