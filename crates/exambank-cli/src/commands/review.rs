//! The `exambank review` command.
//!
//! Every invocation loads the batch file, applies one action and writes it
//! back. Questions are numbered from 1, as in the preview table.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Subcommand;

use exambank_core::export::{load_json, write_json};
use exambank_core::model::OptionLetter;
use exambank_core::review::{Edit, ReviewSession, ReviewStatus};
use exambank_core::validate::validate;

use super::{answer_letter, preview_table};

#[derive(Subcommand)]
pub enum ReviewAction {
    /// Show the batch and what each flagged question is missing
    List {
        #[arg(long)]
        batch: PathBuf,
    },

    /// Change fields of one question, then re-check it
    Edit {
        #[arg(long)]
        batch: PathBuf,

        /// Question number (from 1)
        #[arg(long)]
        index: usize,

        /// New question text
        #[arg(long)]
        text: Option<String>,

        /// Option letter to replace (A-D); requires --value
        #[arg(long, requires = "value")]
        option: Option<OptionLetter>,

        /// New text for --option
        #[arg(long, requires = "option")]
        value: Option<String>,

        /// Correct option letter (A-D)
        #[arg(long)]
        answer: Option<OptionLetter>,

        #[arg(long)]
        topic: Option<String>,

        #[arg(long)]
        subject: Option<String>,

        #[arg(long)]
        level: Option<String>,

        /// Illustration URL
        #[arg(long)]
        image: Option<String>,
    },

    /// Mark a question as reviewed
    Done {
        #[arg(long)]
        batch: PathBuf,

        /// Question number (from 1)
        #[arg(long)]
        index: usize,

        /// Mark as done even if the question is incomplete
        #[arg(long)]
        force: bool,
    },
}

pub fn execute(action: ReviewAction) -> Result<()> {
    match action {
        ReviewAction::List { batch } => list(&batch),
        ReviewAction::Edit {
            batch,
            index,
            text,
            option,
            value,
            answer,
            topic,
            subject,
            level,
            image,
        } => {
            let mut edits = Vec::new();
            if let Some(text) = text {
                edits.push(Edit::QuestionText(text));
            }
            if let (Some(letter), Some(value)) = (option, value) {
                edits.push(Edit::Option {
                    index: letter.index(),
                    value,
                });
            }
            if let Some(letter) = answer {
                edits.push(Edit::Answer(letter.index()));
            }
            if let Some(topic) = topic {
                edits.push(Edit::Topic(topic));
            }
            if let Some(subject) = subject {
                edits.push(Edit::Subject(subject));
            }
            if let Some(level) = level {
                edits.push(Edit::Level(level));
            }
            if let Some(image) = image {
                edits.push(Edit::Image(Some(image)));
            }
            anyhow::ensure!(!edits.is_empty(), "nothing to edit; pass at least one field");
            edit(&batch, index, edits)
        }
        ReviewAction::Done {
            batch,
            index,
            force,
        } => done(&batch, index, force),
    }
}

fn load(batch: &Path) -> Result<ReviewSession> {
    Ok(ReviewSession::new(load_json(batch)?))
}

fn save(batch: &Path, session: &ReviewSession) -> Result<()> {
    write_json(session.questions(), batch)
}

/// Convert a 1-based question number.
fn position(session: &ReviewSession, index: usize) -> Result<usize> {
    let len = session.questions().len();
    anyhow::ensure!(
        (1..=len).contains(&index),
        "question {index} does not exist (batch has {len})"
    );
    Ok(index - 1)
}

fn list(batch: &Path) -> Result<()> {
    let session = load(batch)?;
    println!("{}", preview_table(session.questions()));

    let pending = session.pending();
    for &i in &pending {
        let q = session.get(i)?;
        println!("\n{}. {}", i + 1, q.question_text);
        for (slot, option) in q.options.iter().enumerate() {
            let marker = if slot == q.answer_index { " *" } else { "" };
            println!("   {}. {option}{marker}", answer_letter(slot));
        }
        println!("   T. {}", q.topic);
        for issue in validate(q) {
            println!("   - {issue}");
        }
    }

    if pending.is_empty() {
        println!("No questions need review.");
    } else {
        println!("\n{} question(s) need review.", pending.len());
    }
    Ok(())
}

fn edit(batch: &Path, index: usize, edits: Vec<Edit>) -> Result<()> {
    let mut session = load(batch)?;
    let i = position(&session, index)?;

    for e in edits {
        session.edit(i, e)?;
    }
    let status = session.finish_editing(i)?;
    save(batch, &session)?;

    report_status(index, &status);
    Ok(())
}

fn done(batch: &Path, index: usize, force: bool) -> Result<()> {
    let mut session = load(batch)?;
    let i = position(&session, index)?;

    if force {
        session.force_done(i)?;
        save(batch, &session)?;
        println!("Question {index} marked as done without validation.");
        return Ok(());
    }

    let status = session.finish_editing(i)?;
    save(batch, &session)?;
    report_status(index, &status);
    Ok(())
}

fn report_status(index: usize, status: &ReviewStatus) {
    match status {
        ReviewStatus::Complete => println!("Question {index} is complete."),
        ReviewStatus::Incomplete(issues) => {
            println!("Question {index} still needs review:");
            for issue in issues {
                println!("  - {issue}");
            }
        }
    }
}
