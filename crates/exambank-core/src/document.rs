//! Reading uploaded question documents into plain text.

use std::fmt;
use std::path::{Path, PathBuf};

use docx_rs::{DocumentChild, ParagraphChild, RunChild};

use crate::error::ImportError;

/// Document types accepted for bulk import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Txt,
    Docx,
}

impl DocumentFormat {
    /// Pick the format from the file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Result<Self, ImportError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("txt") => Ok(DocumentFormat::Txt),
            Some("docx") => Ok(DocumentFormat::Docx),
            _ => Err(ImportError::UnsupportedFormat(
                path.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string()),
            )),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Txt => write!(f, "txt"),
            DocumentFormat::Docx => write!(f, "docx"),
        }
    }
}

/// Read a `.txt` or `.docx` file as text, one line per paragraph.
///
/// The format is checked before the file is opened.
pub fn read_document(path: &Path) -> Result<String, ImportError> {
    let format = DocumentFormat::from_path(path)?;
    let read_err = |source| ImportError::Read {
        path: path.to_path_buf(),
        source,
    };

    match format {
        DocumentFormat::Txt => std::fs::read_to_string(path).map_err(read_err),
        DocumentFormat::Docx => {
            let bytes = std::fs::read(path).map_err(read_err)?;
            docx_text(&bytes, path)
        }
    }
}

/// Extract paragraph text from a Word document, skipping empty paragraphs.
fn docx_text(bytes: &[u8], path: &Path) -> Result<String, ImportError> {
    let docx = docx_rs::read_docx(bytes).map_err(|e| ImportError::Docx {
        path: PathBuf::from(path),
        message: format!("{e:?}"),
    })?;

    let mut paragraphs = Vec::new();
    for child in &docx.document.children {
        if let DocumentChild::Paragraph(para) = child {
            let mut text = String::new();
            for pc in &para.children {
                if let ParagraphChild::Run(run) = pc {
                    for rc in &run.children {
                        if let RunChild::Text(t) = rc {
                            text.push_str(&t.text);
                        }
                    }
                }
            }
            if !text.trim().is_empty() {
                paragraphs.push(text);
            }
        }
    }

    Ok(paragraphs.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("paper.txt")).unwrap(),
            DocumentFormat::Txt
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("Paper.DOCX")).unwrap(),
            DocumentFormat::Docx
        );
    }

    #[test]
    fn unsupported_extension_fails_fast() {
        let err = DocumentFormat::from_path(Path::new("paper.pdf")).unwrap_err();
        assert!(matches!(err, ImportError::UnsupportedFormat(ref name) if name == "paper.pdf"));
        assert!(DocumentFormat::from_path(Path::new("README")).is_err());
    }

    #[test]
    fn unsupported_file_is_not_opened() {
        let err = read_document(Path::new("/definitely/missing/paper.odt")).unwrap_err();
        assert!(matches!(err, ImportError::UnsupportedFormat(_)));
    }

    #[test]
    fn read_text_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paper.txt");
        std::fs::write(&path, "1. Q\nA. a*").unwrap();
        assert_eq!(read_document(&path).unwrap(), "1. Q\nA. a*");
    }

    #[test]
    fn missing_text_file_is_read_error() {
        let err = read_document(Path::new("/definitely/missing/paper.txt")).unwrap_err();
        assert!(matches!(err, ImportError::Read { .. }));
    }

    #[test]
    fn garbage_docx_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paper.docx");
        std::fs::write(&path, b"not a zip archive").unwrap();
        let err = read_document(&path).unwrap_err();
        assert!(matches!(err, ImportError::Docx { .. }));
        assert!(err.is_content_error());
    }

    fn write_docx(path: &Path, paragraphs: &[&str]) {
        use docx_rs::{Docx, Paragraph, Run};

        let docx = paragraphs.iter().fold(Docx::new(), |docx, text| {
            let para = if text.is_empty() {
                Paragraph::new()
            } else {
                Paragraph::new().add_run(Run::new().add_text(*text))
            };
            docx.add_paragraph(para)
        });
        let file = std::fs::File::create(path).unwrap();
        docx.build().pack(file).unwrap();
    }

    #[test]
    fn read_word_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paper.docx");
        write_docx(
            &path,
            &[
                "1. What is 2+2?",
                "",
                "A. 3",
                "B. 4*",
                "C. 5",
                "D. 6",
                "T. Arithmetic",
            ],
        );

        let text = read_document(&path).unwrap();
        assert_eq!(
            text,
            "1. What is 2+2?\nA. 3\nB. 4*\nC. 5\nD. 6\nT. Arithmetic"
        );

        let ctx = crate::model::BatchContext::new("Mathematics", "Form 1").unwrap();
        let report = crate::parse_text(&text, &ctx).unwrap();
        assert_eq!(report.questions.len(), 1);
        let q = &report.questions[0];
        assert_eq!(q.options, vec!["3", "4", "5", "6"]);
        assert_eq!(q.answer_index, 1);
        assert!(!q.needs_review);
    }
}
