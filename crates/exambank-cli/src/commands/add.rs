//! The `exambank add` command: store one question without a document.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use exambank_client::{QuestionBank, QuestionPayload};
use exambank_core::model::{BatchContext, OptionLetter, ParsedQuestion, OPTION_COUNT};
use exambank_core::validate::validate;

use super::connect;

#[derive(Args)]
pub struct AddArgs {
    /// Question text
    #[arg(long)]
    text: String,

    /// Option text, in order A to D (repeat four times)
    #[arg(long = "option", required = true)]
    options: Vec<String>,

    /// Correct option letter (A-D)
    #[arg(long)]
    answer: OptionLetter,

    #[arg(long)]
    topic: String,

    #[arg(long)]
    subject: String,

    #[arg(long)]
    level: String,

    /// Illustration URL
    #[arg(long)]
    image: Option<String>,
}

pub async fn execute(args: AddArgs, config_path: Option<PathBuf>) -> Result<()> {
    let (config, bank) = connect(config_path.as_deref())?;
    let ctx = BatchContext::new(
        config.resolve_subject(&args.subject)?,
        config.resolve_level(&args.level)?,
    )?;

    let question = build_question(args, &ctx)?;
    let created = add_question(&bank, &question).await?;

    println!("Question added: {}", question.question_text);
    if let Some(id) = created.get("_id").or_else(|| created.get("id")) {
        println!("Question id: {id}");
    }
    Ok(())
}

fn build_question(args: AddArgs, ctx: &BatchContext) -> Result<ParsedQuestion> {
    anyhow::ensure!(
        args.options.len() <= OPTION_COUNT,
        "at most {OPTION_COUNT} options, got {}",
        args.options.len()
    );

    let mut question = ParsedQuestion::new(args.text.trim(), ctx);
    question.options = args.options.iter().map(|o| o.trim().to_string()).collect();
    question.answer_index = args.answer.index();
    question.topic = args.topic.trim().to_string();
    question.image = args.image;
    Ok(question)
}

/// Check the question is complete, then store it.
pub async fn add_question(
    bank: &dyn QuestionBank,
    question: &ParsedQuestion,
) -> Result<serde_json::Value> {
    let issues = validate(question);
    if !issues.is_empty() {
        let reasons: Vec<String> = issues.iter().map(ToString::to_string).collect();
        anyhow::bail!("question is incomplete: {}", reasons.join("; "));
    }

    tracing::info!(backend = bank.name(), topic = %question.topic, "adding question");
    bank.add_question(&QuestionPayload::from(question)).await
}
