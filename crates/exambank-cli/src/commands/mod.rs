pub mod add;
pub mod exam;
pub mod init;
pub mod parse;
pub mod questions;
pub mod review;
pub mod students;
pub mod submit;
pub mod validate;

use std::path::Path;

use anyhow::Result;
use comfy_table::{Cell, Table};

use exambank_client::config::load_config_from;
use exambank_client::{ExambankConfig, HttpQuestionBank};
use exambank_core::model::{OptionLetter, ParsedQuestion};

/// Load the config and build the HTTP question bank from it.
pub fn connect(config_path: Option<&Path>) -> Result<(ExambankConfig, HttpQuestionBank)> {
    let config = load_config_from(config_path)?;
    let bank = HttpQuestionBank::new(&config.api)?;
    Ok((config, bank))
}

/// Letter shown for an answer index, `?` when it has no letter.
pub fn answer_letter(index: usize) -> String {
    OptionLetter::from_index(index)
        .map(|l| l.to_string())
        .unwrap_or_else(|| "?".to_string())
}

/// Shorten long prompts for table display.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}

/// Preview table of a batch, numbered from 1.
pub fn preview_table(questions: &[ParsedQuestion]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["#", "Question", "Options", "Answer", "Topic", "Status"]);

    for (i, q) in questions.iter().enumerate() {
        let filled = q.options.iter().filter(|o| !o.is_empty()).count();
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(truncate(&q.question_text, 48)),
            Cell::new(format!("{filled}/{}", q.options.len())),
            Cell::new(answer_letter(q.answer_index)),
            Cell::new(&q.topic),
            Cell::new(if q.needs_review { "REVIEW" } else { "OK" }),
        ]);
    }

    table
}
