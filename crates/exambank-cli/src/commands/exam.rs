//! The `exambank exam` command.

use std::path::PathBuf;

use anyhow::Result;

use exambank_client::{NewExam, QuestionBank};

use super::connect;

pub async fn execute(
    title: String,
    subject: String,
    level: String,
    duration: u32,
    questions: Vec<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let (config, bank) = connect(config_path.as_deref())?;

    let exam = build_exam(
        title,
        config.resolve_subject(&subject)?,
        config.resolve_level(&level)?,
        duration,
        questions,
    )?;

    let created = bank.create_exam(&exam).await?;
    println!(
        "Exam '{}' created with {} questions ({} min).",
        exam.title,
        exam.questions.len(),
        exam.duration
    );
    if let Some(id) = created.get("id").or_else(|| created.get("_id")) {
        println!("Exam id: {id}");
    }
    Ok(())
}

fn build_exam(
    title: String,
    subject: String,
    level: String,
    duration: u32,
    questions: Vec<String>,
) -> Result<NewExam> {
    let title = title.trim().to_string();
    anyhow::ensure!(!title.is_empty(), "exam title is required");
    anyhow::ensure!(duration >= 1, "duration must be at least 1 minute");

    let mut ids: Vec<String> = Vec::new();
    for id in questions.iter().map(|q| q.trim()).filter(|q| !q.is_empty()) {
        if !ids.iter().any(|seen| seen == id) {
            ids.push(id.to_string());
        }
    }
    anyhow::ensure!(!ids.is_empty(), "select at least one question");

    Ok(NewExam {
        title,
        subject,
        level,
        duration,
        questions: ids,
    })
}
