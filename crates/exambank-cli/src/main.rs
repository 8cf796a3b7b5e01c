//! exambank CLI: bulk question import, review and submission.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "exambank", version, about = "Question bank tooling for school exams")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a .txt or .docx question document into a JSON batch
    Parse {
        /// Question document
        #[arg(long)]
        file: PathBuf,

        /// Subject applied to every question
        #[arg(long)]
        subject: String,

        /// Class level applied to every question
        #[arg(long)]
        level: String,

        /// Where to write the batch (default: <output_dir>/questions-<timestamp>.json)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Check a JSON batch for incomplete questions
    Validate {
        /// Batch file written by `parse`
        #[arg(long)]
        batch: PathBuf,
    },

    /// Review and fix questions in a JSON batch
    Review {
        #[command(subcommand)]
        action: commands::review::ReviewAction,
    },

    /// Add a single question to the platform
    Add(commands::add::AddArgs),

    /// Submit a complete batch to the platform
    Submit {
        /// Batch file written by `parse`
        #[arg(long)]
        batch: PathBuf,
    },

    /// List questions stored on the platform
    Questions {
        /// Only show questions for this subject
        #[arg(long)]
        subject: Option<String>,

        /// Only show questions for this level
        #[arg(long)]
        level: Option<String>,
    },

    /// Create an exam from stored question ids
    Exam {
        #[arg(long)]
        title: String,

        #[arg(long)]
        subject: String,

        #[arg(long)]
        level: String,

        /// Duration in minutes
        #[arg(long)]
        duration: u32,

        /// Comma-separated question ids
        #[arg(long, value_delimiter = ',')]
        questions: Vec<String>,
    },

    /// Show the student roster for a class
    Students {
        #[arg(long)]
        level: String,

        #[arg(long, value_enum, default_value_t = commands::students::RosterFormat::Text)]
        format: commands::students::RosterFormat,

        /// Write the roster to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Show dashboard statistics for a class
    Stats {
        #[arg(long)]
        level: String,
    },

    /// Create a starter config and a sample question document
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("exambank=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command {
        Commands::Parse {
            file,
            subject,
            level,
            output,
        } => commands::parse::execute(file, subject, level, output, config),
        Commands::Validate { batch } => commands::validate::execute(batch),
        Commands::Review { action } => commands::review::execute(action),
        Commands::Add(args) => commands::add::execute(args, config).await,
        Commands::Submit { batch } => commands::submit::execute(batch, config).await,
        Commands::Questions { subject, level } => {
            commands::questions::execute(subject, level, config).await
        }
        Commands::Exam {
            title,
            subject,
            level,
            duration,
            questions,
        } => commands::exam::execute(title, subject, level, duration, questions, config).await,
        Commands::Students {
            level,
            format,
            output,
        } => commands::students::execute(level, format, output, config).await,
        Commands::Stats { level } => commands::students::stats(level, config).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
