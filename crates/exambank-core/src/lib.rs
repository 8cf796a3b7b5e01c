//! exambank-core: question model, bulk document parser and export.
//!
//! This crate turns teacher-authored question documents into structured,
//! validated question records and carries them through review and export.

pub mod classify;
pub mod document;
pub mod error;
pub mod export;
pub mod model;
pub mod parser;
pub mod review;
pub mod roster;
pub mod scan;
pub mod validate;

pub use error::{ImportError, ReviewError};
pub use model::{BatchContext, OptionLetter, ParsedQuestion, Student};
pub use parser::{import_document, parse_text};
pub use scan::ScanReport;
