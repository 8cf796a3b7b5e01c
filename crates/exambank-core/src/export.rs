//! JSON export of a question batch.
//!
//! The exported file is a plain array of question objects, two-space indented,
//! with keys in model order. It doubles as the hand-off format between the
//! `parse`, `review` and `submit` commands.

use std::path::Path;

use anyhow::{Context, Result};

use crate::model::ParsedQuestion;

/// Serialize a batch as a pretty-printed JSON array.
pub fn to_json(questions: &[ParsedQuestion]) -> Result<String> {
    serde_json::to_string_pretty(questions).context("failed to serialize questions")
}

/// Write a batch to `path`, creating parent directories as needed.
pub fn write_json(questions: &[ParsedQuestion], path: &Path) -> Result<()> {
    let json = to_json(questions)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    std::fs::write(path, json)
        .with_context(|| format!("failed to write questions to {}", path.display()))?;
    Ok(())
}

/// Load a batch previously written by [`write_json`].
pub fn load_json(path: &Path) -> Result<Vec<ParsedQuestion>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read questions from {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse questions JSON: {}", path.display()))
}
