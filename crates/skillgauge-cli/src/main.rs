//! skillgauge CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

const DEFAULT_QUESTIONS: &str = "assessments/salesforce.toml";
const DEFAULT_MATRIX: &str = "assessments/salesforce-matrix.toml";

#[derive(Parser)]
#[command(name = "skillgauge", version, about = "Skill self-assessment quiz tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an interactive assessment session
    Run {
        /// Path to the question catalog TOML
        #[arg(long, default_value = DEFAULT_QUESTIONS)]
        questions: PathBuf,

        /// Path to the score matrix TOML
        #[arg(long, default_value = DEFAULT_MATRIX)]
        matrix: PathBuf,

        /// Starting experience bracket: 0-3, 3-6, or 6-9
        #[arg(long)]
        bracket: Option<String>,

        /// Results format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Validate catalog and matrix files and their cross-alignment
    Validate {
        /// Path to the question catalog TOML
        #[arg(long, default_value = DEFAULT_QUESTIONS)]
        questions: PathBuf,

        /// Path to the score matrix TOML
        #[arg(long, default_value = DEFAULT_MATRIX)]
        matrix: PathBuf,
    },

    /// Create starter catalog and score-matrix files
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("skillgauge=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            questions,
            matrix,
            bracket,
            format,
        } => commands::run::execute(questions, matrix, bracket, format),
        Commands::Validate { questions, matrix } => commands::validate::execute(questions, matrix),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
