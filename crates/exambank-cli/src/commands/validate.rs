//! The `exambank validate` command.

use std::path::PathBuf;

use anyhow::Result;

use exambank_core::export::load_json;
use exambank_core::validate::validate;

pub fn execute(batch: PathBuf) -> Result<()> {
    let questions = load_json(&batch)?;
    println!("Batch: {} ({} questions)", batch.display(), questions.len());

    let mut incomplete = 0;
    for (i, q) in questions.iter().enumerate() {
        let issues = validate(q);
        if issues.is_empty() {
            continue;
        }
        incomplete += 1;
        for issue in &issues {
            println!("  [{}] WARNING: {issue}", i + 1);
        }
    }

    if incomplete == 0 {
        println!("All questions complete.");
    } else {
        println!("\n{incomplete} question(s) need review.");
    }

    Ok(())
}
