//! Question accumulator.
//!
//! The scan is a fold over classified lines: [`Scan::step`] takes the current
//! state and one line and returns the next state, [`Scan::finish`] performs the
//! end-of-input flush. Each transition can be exercised on its own.

use serde::Serialize;
use tracing::debug;

use crate::classify::{classify_line, LineKind};
use crate::model::{BatchContext, OptionLetter, ParsedQuestion, OPTION_COUNT};
use crate::validate::is_valid;

/// A numbered question that was discarded because no option followed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedQuestion {
    /// 1-based line number of the question start.
    pub line: usize,
    pub text: String,
}

/// Result of scanning one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScanReport {
    /// Flushed records in document order.
    pub questions: Vec<ParsedQuestion>,
    /// Question starts that never collected an option.
    pub dropped: Vec<DroppedQuestion>,
    /// Positions in `questions` whose answer was never marked with `*`.
    pub unmarked_answers: Vec<usize>,
    /// Non-blank lines that did not contribute to any record.
    pub ignored_lines: usize,
}

impl ScanReport {
    /// Number of records flagged for review.
    pub fn needs_review_count(&self) -> usize {
        self.questions.iter().filter(|q| q.needs_review).count()
    }

    /// One-line summary suitable for display after a parse.
    pub fn summary(&self) -> String {
        format!(
            "Successfully parsed {} questions. {} questions need review.",
            self.questions.len(),
            self.needs_review_count()
        )
    }
}

/// The record being accumulated.
#[derive(Debug, Clone, PartialEq)]
struct Draft {
    line: usize,
    question: ParsedQuestion,
    answer_marked: bool,
}

impl Draft {
    fn new(line: usize, text: &str, ctx: &BatchContext) -> Self {
        Self {
            line,
            question: ParsedQuestion::new(text, ctx),
            answer_marked: false,
        }
    }

    fn set_option(&mut self, letter: OptionLetter, text: &str, is_correct: bool) {
        let index = letter.index();
        let options = &mut self.question.options;
        if options.len() <= index {
            options.resize(index + 1, String::new());
        }
        options[index] = text.to_string();

        if is_correct {
            self.question.answer_index = index;
            self.answer_marked = true;
        }
    }

    fn is_flushable(&self) -> bool {
        !self.question.question_text.is_empty() && !self.question.options.is_empty()
    }
}

/// Accumulator state between lines.
#[derive(Debug, Clone, Default)]
pub struct Scan {
    current: Option<Draft>,
    report: ScanReport,
}

impl Scan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one classified line.
    #[must_use]
    pub fn step(mut self, line: usize, kind: LineKind<'_>, ctx: &BatchContext) -> Self {
        match kind {
            LineKind::QuestionStart { text } => {
                self.flush();
                self.current = Some(Draft::new(line, text, ctx));
            }
            LineKind::Topic { text } => match self.current.as_mut() {
                Some(draft) => draft.question.topic = text.to_string(),
                None => self.report.ignored_lines += 1,
            },
            LineKind::Option {
                letter,
                text,
                is_correct,
            } => match self.current.as_mut() {
                Some(draft) => draft.set_option(letter, text, is_correct),
                None => self.report.ignored_lines += 1,
            },
            LineKind::Other => self.report.ignored_lines += 1,
        }
        self
    }

    /// Flush the last record and return the report.
    pub fn finish(mut self) -> ScanReport {
        self.flush();
        self.report
    }

    /// The record currently being accumulated.
    pub fn current(&self) -> Option<&ParsedQuestion> {
        self.current.as_ref().map(|d| &d.question)
    }

    /// Records flushed so far.
    pub fn questions(&self) -> &[ParsedQuestion] {
        &self.report.questions
    }

    fn flush(&mut self) {
        let Some(draft) = self.current.take() else {
            return;
        };

        if !draft.is_flushable() {
            debug!(line = draft.line, "dropping question without options");
            self.report.dropped.push(DroppedQuestion {
                line: draft.line,
                text: draft.question.question_text,
            });
            return;
        }

        let mut question = draft.question;
        if question.options.len() < OPTION_COUNT {
            question.options.resize(OPTION_COUNT, String::new());
        }
        question.needs_review = !is_valid(&question);
        debug!(
            line = draft.line,
            needs_review = question.needs_review,
            "flushed question"
        );

        if !draft.answer_marked {
            self.report.unmarked_answers.push(self.report.questions.len());
        }
        self.report.questions.push(question);
    }
}

/// Trim, skip blank lines, classify and fold every line of `text`.
pub fn scan_text(text: &str, ctx: &BatchContext) -> ScanReport {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .fold(Scan::new(), |scan, (number, line)| {
            scan.step(number, classify_line(line), ctx)
        })
        .finish()
}
