//! The `exambank parse` command.

use std::path::PathBuf;

use anyhow::Result;

use exambank_client::config::load_config_from;
use exambank_core::export::write_json;
use exambank_core::model::BatchContext;
use exambank_core::parser::import_document;

use super::preview_table;

pub fn execute(
    file: PathBuf,
    subject: String,
    level: String,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let ctx = BatchContext::new(config.resolve_subject(&subject)?, config.resolve_level(&level)?)?;

    let report = match import_document(&file, &ctx) {
        Ok(report) => report,
        Err(e) if e.is_content_error() => {
            return Err(anyhow::Error::new(e).context(format!(
                "failed to parse {}. Please check the file format",
                file.display()
            )));
        }
        Err(e) => return Err(e.into()),
    };

    println!("{}", preview_table(&report.questions));

    for dropped in &report.dropped {
        println!(
            "Skipped line {}: question '{}' has no options",
            dropped.line, dropped.text
        );
    }
    for &index in &report.unmarked_answers {
        println!(
            "Question {}: no option marked with '*', answer defaults to A",
            index + 1
        );
    }
    if report.ignored_lines > 0 {
        println!("{} line(s) did not match the question format", report.ignored_lines);
    }

    println!("{}", report.summary());

    let path = output.unwrap_or_else(|| {
        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");
        config.output_dir.join(format!("questions-{timestamp}.json"))
    });
    write_json(&report.questions, &path)?;
    println!("Batch written to: {}", path.display());

    if report.needs_review_count() > 0 {
        println!("Next: exambank review list --batch {}", path.display());
    }

    Ok(())
}
