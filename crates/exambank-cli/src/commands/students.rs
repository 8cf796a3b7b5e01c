//! The `exambank students` and `exambank stats` commands.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use comfy_table::{Cell, Table};

use exambank_client::QuestionBank;
use exambank_core::model::Student;
use exambank_core::roster::{ranked, roster_csv, RosterStats};

use super::connect;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum RosterFormat {
    /// Table with pass/fail and class statistics
    Text,
    Json,
    /// Matricule, name and score, one student per row
    Csv,
}

pub async fn execute(
    level: String,
    format: RosterFormat,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let (config, bank) = connect(config_path.as_deref())?;
    let level = config.resolve_level(&level)?;

    let students = bank.list_students(&level).await?;
    let stats = RosterStats::compute(&students, config.pass_threshold);
    let rendered = render(&level, &students, &stats, format)?;

    match output {
        Some(path) => {
            write_roster(&path, &rendered)?;
            println!(
                "Roster for {level} ({} students) written to: {}",
                students.len(),
                path.display()
            );
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

fn render(
    level: &str,
    students: &[Student],
    stats: &RosterStats,
    format: RosterFormat,
) -> Result<String> {
    let text = match format {
        RosterFormat::Json => {
            let body = serde_json::json!({
                "level": level,
                "students": ranked(students),
                "stats": stats,
            });
            format!("{}\n", serde_json::to_string_pretty(&body)?)
        }
        RosterFormat::Csv => roster_csv(students),
        RosterFormat::Text => {
            let mut table = Table::new();
            table.set_header(vec!["Matricule", "Full Name", "Score", "Result"]);
            for s in ranked(students) {
                table.add_row(vec![
                    Cell::new(&s.matricule),
                    Cell::new(&s.full_name),
                    Cell::new(format!("{:.0}%", s.score)),
                    Cell::new(if stats.passes(s.score) { "PASS" } else { "FAIL" }),
                ]);
            }
            format!(
                "{level}\n{table}\nStudents: {}  Highest: {:.0}%  Passing (>= {:.0}%): {} ({:.1}%)\n",
                stats.total_students,
                stats.highest_score,
                stats.pass_threshold,
                stats.pass_count,
                stats.pass_percentage
            )
        }
    };
    Ok(text)
}

fn write_roster(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

pub async fn stats(level: String, config_path: Option<PathBuf>) -> Result<()> {
    let (config, bank) = connect(config_path.as_deref())?;
    let level = config.resolve_level(&level)?;
    let stats = bank.statistics(&level).await?;

    println!("Dashboard: {level}");
    println!("  Students:      {}", stats.total_students);
    println!("  Highest score: {:.0} %", stats.highest_score);
    println!("  Lowest score:  {:.0} %", stats.lowest_score);
    Ok(())
}
