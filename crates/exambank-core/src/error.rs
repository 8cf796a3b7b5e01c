//! Error types for document import and batch review.
//!
//! Every failure resolves to a displayable message; the in-memory batch is
//! left untouched so the operator can retry.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that stop a document from being turned into a batch.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The file is neither `.txt` nor `.docx`.
    #[error("unsupported file type: {0} (expected .txt or .docx)")]
    UnsupportedFormat(String),

    /// Subject or level was not selected.
    #[error("please select subject and level first")]
    MissingBatchContext,

    /// The document contained no numbered question with options.
    #[error("no questions found in the file")]
    NoQuestionsFound,

    /// The document could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The Word document could not be decoded.
    #[error("failed to decode Word document {}: {message}", path.display())]
    Docx { path: PathBuf, message: String },
}

/// Errors raised by review operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReviewError {
    /// No record at this position.
    #[error("question {index} does not exist (batch has {len})")]
    NoSuchQuestion { index: usize, len: usize },

    /// Option slot beyond the four letters.
    #[error("option index {0} is out of range (0-3)")]
    OptionOutOfRange(usize),

    /// Answer points at an option that does not exist.
    #[error("answer index {index} is out of range for {options} option(s)")]
    AnswerOutOfRange { index: usize, options: usize },

    /// Records fail validation at submit time.
    #[error("{count} questions are incomplete. Please review them.")]
    Incomplete { count: usize },
}

impl ImportError {
    /// Returns `true` if the operator can fix this by editing the input file.
    pub fn is_content_error(&self) -> bool {
        matches!(self, ImportError::NoQuestionsFound | ImportError::Docx { .. })
    }
}
