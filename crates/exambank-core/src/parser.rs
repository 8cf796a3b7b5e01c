//! Bulk question import.
//!
//! Turns a document into a [`ScanReport`]: read, classify each line, fold into
//! records, validate on flush.

use std::path::Path;

use tracing::{info, warn};

use crate::document::read_document;
use crate::error::ImportError;
use crate::model::BatchContext;
use crate::scan::{scan_text, ScanReport};

/// Parse bulk-format text. Fails when no question was recognised.
pub fn parse_text(text: &str, ctx: &BatchContext) -> Result<ScanReport, ImportError> {
    let report = scan_text(text, ctx);

    for dropped in &report.dropped {
        warn!(
            line = dropped.line,
            "question '{}' has no options and was skipped", dropped.text
        );
    }

    if report.questions.is_empty() {
        return Err(ImportError::NoQuestionsFound);
    }

    info!(
        questions = report.questions.len(),
        needs_review = report.needs_review_count(),
        dropped = report.dropped.len(),
        subject = %ctx.subject,
        level = %ctx.level,
        "parsed question document"
    );
    Ok(report)
}

/// Read a `.txt` or `.docx` document and parse it.
pub fn import_document(path: &Path, ctx: &BatchContext) -> Result<ScanReport, ImportError> {
    let text = read_document(path)?;
    parse_text(&text, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::to_json;

    const PAPER: &str = r#"
FORM 1 MATHEMATICS - TERM 2

1. What is 2+2?
A. 3
B. 4*
C. 5
D. 6
T. Arithmetic

2. Simplify 3x + 2x
A. 5x*
B. 6x
C. x
D. 5
T. Algebra

3. Which shape has three sides?
A. Square
B. Circle
C. Triangle *
T. Geometry
"#;

    fn ctx() -> BatchContext {
        BatchContext::new("Mathematics", "Form 1").unwrap()
    }

    #[test]
    fn parse_paper() {
        let report = parse_text(PAPER, &ctx()).unwrap();
        assert_eq!(report.questions.len(), 3);
        assert_eq!(report.needs_review_count(), 1);
        assert_eq!(report.questions[1].answer_index, 0);
        assert_eq!(report.questions[2].answer_index, 2);
        assert!(report.questions[2].needs_review);
        assert_eq!(report.ignored_lines, 1);
    }

    #[test]
    fn no_question_starts_is_an_error() {
        let err = parse_text("Just some notes\nA. not attached", &ctx()).unwrap_err();
        assert!(matches!(err, ImportError::NoQuestionsFound));
        assert_eq!(err.to_string(), "no questions found in the file");
    }

    #[test]
    fn only_optionless_questions_is_an_error() {
        let err = parse_text("1. First\n2. Second", &ctx()).unwrap_err();
        assert!(matches!(err, ImportError::NoQuestionsFound));
    }

    #[test]
    fn windows_line_endings() {
        let report = parse_text("1. Q\r\nA. a*\r\nB. b\r\nC. c\r\nD. d\r\nT. t\r\n", &ctx()).unwrap();
        assert_eq!(report.questions[0].options, vec!["a", "b", "c", "d"]);
        assert!(!report.questions[0].needs_review);
    }

    #[test]
    fn parsing_is_deterministic() {
        let a = to_json(&parse_text(PAPER, &ctx()).unwrap().questions).unwrap();
        let b = to_json(&parse_text(PAPER, &ctx()).unwrap().questions).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn import_text_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paper.txt");
        std::fs::write(&path, PAPER).unwrap();
        let report = import_document(&path, &ctx()).unwrap();
        assert_eq!(report.questions.len(), 3);
    }

    #[test]
    fn import_rejects_unsupported_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paper.pdf");
        std::fs::write(&path, PAPER).unwrap();
        let err = import_document(&path, &ctx()).unwrap_err();
        assert!(matches!(err, ImportError::UnsupportedFormat(_)));
    }
}
