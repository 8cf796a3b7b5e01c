//! The `exambank submit` command.

use std::path::PathBuf;

use anyhow::Result;

use exambank_client::{ApiError, BulkSubmitResponse, QuestionBank};
use exambank_core::export::load_json;
use exambank_core::model::ParsedQuestion;
use exambank_core::review::ReviewSession;
use exambank_core::ReviewError;

use super::connect;

pub async fn execute(batch: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let questions = load_json(&batch)?;
    let (_config, bank) = connect(config_path.as_deref())?;

    eprintln!("Submitting {} questions from {}", questions.len(), batch.display());

    match submit_batch(&bank, questions).await {
        Ok(response) => {
            let message = if response.message.is_empty() {
                "Questions submitted successfully!".to_string()
            } else {
                response.message
            };
            println!("{message}");
            Ok(())
        }
        Err(e) if e.downcast_ref::<ReviewError>().is_some() => {
            Err(e.context("batch is not ready for submission"))
        }
        Err(e) => {
            let hint = match e.downcast_ref::<ApiError>() {
                Some(api) if api.is_client_error() => "the platform rejected the batch",
                _ => "the batch file is unchanged; retry when the platform is reachable",
            };
            Err(e.context(format!("failed to submit questions ({hint})")))
        }
    }
}

/// Re-validate every question, then send the batch in one call.
pub async fn submit_batch(
    bank: &dyn QuestionBank,
    questions: Vec<ParsedQuestion>,
) -> Result<BulkSubmitResponse> {
    let session = ReviewSession::new(questions);
    session.ensure_submittable()?;
    anyhow::ensure!(!session.questions().is_empty(), "batch is empty");

    tracing::info!(backend = bank.name(), "submitting batch");
    bank.submit_questions(session.questions()).await
}
