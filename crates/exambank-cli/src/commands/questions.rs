//! The `exambank questions` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use exambank_client::QuestionBank;

use super::{answer_letter, connect, truncate};

pub async fn execute(
    subject: Option<String>,
    level: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let (_config, bank) = connect(config_path.as_deref())?;
    let mut questions = bank.list_questions().await?;

    if let Some(subject) = &subject {
        questions.retain(|q| q.question.subject.eq_ignore_ascii_case(subject));
    }
    if let Some(level) = &level {
        questions.retain(|q| q.question.level.iter().any(|l| l.eq_ignore_ascii_case(level)));
    }

    if questions.is_empty() {
        println!("No questions found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Id", "Question", "Answer", "Topic", "Subject", "Level"]);
    for q in &questions {
        table.add_row(vec![
            Cell::new(&q.id),
            Cell::new(truncate(&q.question.question, 48)),
            Cell::new(answer_letter(q.question.answer)),
            Cell::new(&q.question.topic),
            Cell::new(&q.question.subject),
            Cell::new(q.question.level.join(", ")),
        ]);
    }

    println!("{table}");
    println!("{} question(s)", questions.len());
    Ok(())
}
