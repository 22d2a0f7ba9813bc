//! quizkit CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod display;
mod sinks;

#[derive(Parser)]
#[command(name = "quizkit", version, about = "Terminal trivia quiz player")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a quiz
    Play {
        /// Quiz ID (see `quizkit list`)
        #[arg(long)]
        quiz: String,

        /// Answers to submit instead of reading stdin (comma-separated ids or numbers)
        #[arg(long)]
        answers: Option<String>,

        /// Save the finished run to the results directory
        #[arg(long)]
        save: bool,

        /// End the quiz once its time limit has passed
        #[arg(long)]
        enforce_time_limit: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List available quizzes
    List {
        /// Only show quizzes in this category
        #[arg(long)]
        category: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List quiz categories
    Categories {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate quiz set TOML files
    Validate {
        /// Path to quiz set file or directory
        #[arg(long)]
        quiz_set: PathBuf,
    },

    /// Show saved runs
    History {
        /// Only show runs of this quiz
        #[arg(long)]
        quiz: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and example quiz set
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("quizkit=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            quiz,
            answers,
            save,
            enforce_time_limit,
            config,
        } => commands::play::execute(quiz, answers, save, enforce_time_limit, config),
        Commands::List { category, config } => commands::list::execute(category, config),
        Commands::Categories { config } => commands::categories::execute(config),
        Commands::Validate { quiz_set } => commands::validate::execute(quiz_set),
        Commands::History { quiz, config } => commands::history::execute(quiz, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
